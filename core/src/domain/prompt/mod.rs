pub mod entities;
pub mod lesson;
pub mod ports;
pub mod services;
pub mod value_objects;
