//! Read-only aggregations for the dashboard and the daily report.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{DashboardRepository, SeaOrmDashboardRepository};
pub use service::DashboardService;
