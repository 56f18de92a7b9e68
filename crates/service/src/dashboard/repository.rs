use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use models::{car, package, payment, service_record};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use super::domain::{DailyReportRow, DailyRevenue, DailyServices, PackagePopularity, PopularityRow};
use crate::errors::ServiceError;
use crate::store::{self, DEFAULT_QUERY_TIMEOUT};

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn count_cars(&self) -> Result<u64, ServiceError>;
    async fn count_services(&self) -> Result<u64, ServiceError>;
    /// Sum of every payment, 0 when there are none.
    async fn total_revenue(&self) -> Result<f64, ServiceError>;
    async fn recent_services(&self, limit: u64) -> Result<Vec<service_record::Detail>, ServiceError>;
    async fn recent_payments(&self, limit: u64) -> Result<Vec<payment::Detail>, ServiceError>;
    /// Every package with its service count, most used first.
    async fn package_popularity(&self, limit: Option<u64>) -> Result<Vec<PackagePopularity>, ServiceError>;
    async fn revenue_by_date(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyRevenue>, ServiceError>;
    async fn services_by_date(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyServices>, ServiceError>;
    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<DailyReportRow>, ServiceError>;
}

pub struct SeaOrmDashboardRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl SeaOrmDashboardRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

impl From<DatabaseConnection> for SeaOrmDashboardRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl DashboardRepository for SeaOrmDashboardRepository {
    async fn count_cars(&self) -> Result<u64, ServiceError> {
        store::run(self.timeout, car::Entity::find().count(&self.db)).await
    }

    async fn count_services(&self) -> Result<u64, ServiceError> {
        store::run(self.timeout, service_record::Entity::find().count(&self.db)).await
    }

    async fn total_revenue(&self) -> Result<f64, ServiceError> {
        let query = payment::Entity::find()
            .select_only()
            .column_as(payment::Column::AmountPaid.sum(), "total")
            .into_tuple::<Option<f64>>();
        let total = store::run(self.timeout, query.one(&self.db)).await?;
        Ok(total.flatten().unwrap_or(0.0))
    }

    async fn recent_services(&self, limit: u64) -> Result<Vec<service_record::Detail>, ServiceError> {
        let query = service_record::find_details()
            .order_by_desc(service_record::Column::CreatedAt)
            .limit(limit)
            .into_model::<service_record::Detail>();
        store::run(self.timeout, query.all(&self.db)).await
    }

    async fn recent_payments(&self, limit: u64) -> Result<Vec<payment::Detail>, ServiceError> {
        let query = payment::find_details()
            .order_by_desc(payment::Column::CreatedAt)
            .limit(limit)
            .into_model::<payment::Detail>();
        store::run(self.timeout, query.all(&self.db)).await
    }

    async fn package_popularity(&self, limit: Option<u64>) -> Result<Vec<PackagePopularity>, ServiceError> {
        let query = package::Entity::find()
            .select_only()
            .columns([package::Column::PackageNumber, package::Column::PackageName, package::Column::PackagePrice])
            .column_as(service_record::Column::RecordNumber.count(), "service_count")
            .join(JoinType::LeftJoin, package::Relation::ServiceRecord.def())
            .group_by(package::Column::PackageNumber)
            .group_by(package::Column::PackageName)
            .group_by(package::Column::PackagePrice)
            .order_by(service_record::Column::RecordNumber.count(), Order::Desc)
            .order_by_asc(package::Column::PackageName)
            .limit(limit)
            .into_model::<PopularityRow>();
        let rows = store::run(self.timeout, query.all(&self.db)).await?;
        Ok(rows.into_iter().map(PackagePopularity::from).collect())
    }

    async fn revenue_by_date(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyRevenue>, ServiceError> {
        let query = payment::Entity::find()
            .select_only()
            .column_as(payment::Column::PaymentDate, "date")
            .column_as(payment::Column::AmountPaid.sum(), "daily_revenue")
            .column_as(payment::Column::PaymentNumber.count(), "payment_count")
            .filter(payment::Column::PaymentDate.between(start, end))
            .group_by(payment::Column::PaymentDate)
            .order_by_asc(payment::Column::PaymentDate)
            .into_model::<DailyRevenue>();
        store::run(self.timeout, query.all(&self.db)).await
    }

    async fn services_by_date(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyServices>, ServiceError> {
        let query = service_record::Entity::find()
            .select_only()
            .column_as(service_record::Column::ServiceDate, "date")
            .column_as(service_record::Column::RecordNumber.count(), "service_count")
            .filter(service_record::Column::ServiceDate.between(start, end))
            .group_by(service_record::Column::ServiceDate)
            .order_by_asc(service_record::Column::ServiceDate)
            .into_model::<DailyServices>();
        store::run(self.timeout, query.all(&self.db)).await
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<DailyReportRow>, ServiceError> {
        let query = service_record::Entity::find()
            .select_only()
            .columns([
                service_record::Column::RecordNumber,
                service_record::Column::ServiceDate,
                service_record::Column::PlateNumber,
            ])
            .column_as(car::Column::DriverName, "driver_name")
            .column_as(car::Column::CarType, "car_type")
            .column_as(car::Column::CarSize, "car_size")
            .column_as(package::Column::PackageName, "package_name")
            .column_as(package::Column::PackageDescription, "package_description")
            .column_as(package::Column::PackagePrice, "package_price")
            .column_as(payment::Column::PaymentNumber, "payment_number")
            .column_as(payment::Column::AmountPaid, "amount_paid")
            .column_as(payment::Column::PaymentDate, "payment_date")
            .join(JoinType::InnerJoin, service_record::Relation::Car.def())
            .join(JoinType::InnerJoin, service_record::Relation::Package.def())
            .join(JoinType::LeftJoin, service_record::Relation::Payment.def())
            .filter(service_record::Column::ServiceDate.eq(date))
            .order_by_asc(service_record::Column::CreatedAt)
            .order_by_asc(payment::Column::CreatedAt)
            .into_model::<DailyReportRow>();
        store::run(self.timeout, query.all(&self.db)).await
    }
}
