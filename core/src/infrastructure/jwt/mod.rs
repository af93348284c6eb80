pub mod jwt_repository;

pub use jwt_repository::JwtTokenRepository;
