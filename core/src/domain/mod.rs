pub mod admin;
pub mod authentication;
pub mod category;
pub mod common;
pub mod crypto;
pub mod health;
pub mod jwt;
pub mod prompt;
pub mod user;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;
