//! Cars, keyed by the caller-supplied plate number.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{CarRepository, SeaOrmCarRepository};
pub use service::CarService;
