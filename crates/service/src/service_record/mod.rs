//! Service records: one car visit for one package on one date.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{SeaOrmServiceRecordRepository, ServiceRecordRepository};
pub use service::ServiceRecordService;
