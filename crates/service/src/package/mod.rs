//! Service packages, keyed by generated `PK-` identifiers.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{PackageRepository, SeaOrmPackageRepository};
pub use service::PackageService;
