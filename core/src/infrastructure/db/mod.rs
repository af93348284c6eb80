pub mod errors;
pub mod postgres;
pub mod statement;
