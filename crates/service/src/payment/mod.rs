//! Payments settling service records.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{PaymentRepository, SeaOrmPaymentRepository};
pub use service::PaymentService;
