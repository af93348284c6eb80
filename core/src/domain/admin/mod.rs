pub mod export;
pub mod ports;
pub mod services;
pub mod value_objects;
