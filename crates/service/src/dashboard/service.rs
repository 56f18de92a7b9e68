use std::sync::Arc;

use models::validation;
use tracing::{debug, instrument};

use super::domain::{DailyReportRow, DailyRevenue, DailyServices, DashboardStats, PackagePopularity, PANEL_SIZE};
use super::repository::DashboardRepository;
use crate::errors::ServiceError;

pub struct DashboardService {
    repo: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn DashboardRepository>) -> Self { Self { repo } }

    /// Totals plus the recent and popular panels.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let stats = DashboardStats {
            total_cars: self.repo.count_cars().await?,
            total_services: self.repo.count_services().await?,
            total_revenue: self.repo.total_revenue().await?,
            recent_services: self.repo.recent_services(PANEL_SIZE).await?,
            recent_payments: self.repo.recent_payments(PANEL_SIZE).await?,
            popular_packages: self.repo.package_popularity(Some(PANEL_SIZE)).await?,
        };
        debug!(total_cars = stats.total_cars, total_services = stats.total_services, "dashboard_stats");
        Ok(stats)
    }

    pub async fn revenue_by_date_range(&self, start: &str, end: &str) -> Result<Vec<DailyRevenue>, ServiceError> {
        let (start, end) = validation::date_range(start, end)?;
        self.repo.revenue_by_date(start, end).await
    }

    pub async fn service_stats_by_date_range(&self, start: &str, end: &str) -> Result<Vec<DailyServices>, ServiceError> {
        let (start, end) = validation::date_range(start, end)?;
        self.repo.services_by_date(start, end).await
    }

    pub async fn package_popularity(&self) -> Result<Vec<PackagePopularity>, ServiceError> {
        self.repo.package_popularity(None).await
    }

    pub async fn daily_report(&self, date: &str) -> Result<Vec<DailyReportRow>, ServiceError> {
        let date = validation::date(date)?;
        self.repo.daily_report(date).await
    }
}
