use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use models::payment::{self, Detail};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::domain::PaymentFields;
use crate::errors::ServiceError;
use crate::store::{self, DEFAULT_QUERY_TIMEOUT};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Detail>, ServiceError>;
    async fn get(&self, payment_number: &str) -> Result<Option<Detail>, ServiceError>;
    async fn exists(&self, payment_number: &str) -> Result<bool, ServiceError>;
    async fn by_record(&self, record_number: &str) -> Result<Vec<Detail>, ServiceError>;
    /// Inclusive on both ends, latest payment date first.
    async fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Detail>, ServiceError>;
    /// Sum of amounts paid in the range, 0 when there are none.
    async fn revenue_between(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, ServiceError>;
    async fn insert(&self, payment_number: String, fields: PaymentFields) -> Result<payment::Model, ServiceError>;
    async fn update(&self, payment_number: &str, fields: PaymentFields) -> Result<bool, ServiceError>;
    async fn delete(&self, payment_number: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmPaymentRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

impl From<DatabaseConnection> for SeaOrmPaymentRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn list(&self) -> Result<Vec<Detail>, ServiceError> {
        let query = payment::find_details().order_by_desc(payment::Column::CreatedAt);
        store::run(self.timeout, query.into_model::<Detail>().all(&self.db)).await
    }

    async fn get(&self, payment_number: &str) -> Result<Option<Detail>, ServiceError> {
        let query = payment::find_details().filter(payment::Column::PaymentNumber.eq(payment_number));
        store::run(self.timeout, query.into_model::<Detail>().one(&self.db)).await
    }

    async fn exists(&self, payment_number: &str) -> Result<bool, ServiceError> {
        let found =
            store::run(self.timeout, payment::Entity::find_by_id(payment_number.to_string()).one(&self.db)).await?;
        Ok(found.is_some())
    }

    async fn by_record(&self, record_number: &str) -> Result<Vec<Detail>, ServiceError> {
        let query = payment::find_details()
            .filter(payment::Column::RecordNumber.eq(record_number))
            .order_by_desc(payment::Column::CreatedAt);
        store::run(self.timeout, query.into_model::<Detail>().all(&self.db)).await
    }

    async fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Detail>, ServiceError> {
        let query = payment::find_details()
            .filter(payment::Column::PaymentDate.between(start, end))
            .order_by_desc(payment::Column::PaymentDate)
            .order_by_desc(payment::Column::CreatedAt);
        store::run(self.timeout, query.into_model::<Detail>().all(&self.db)).await
    }

    async fn revenue_between(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, ServiceError> {
        let query = payment::Entity::find()
            .select_only()
            .column_as(payment::Column::AmountPaid.sum(), "total")
            .filter(payment::Column::PaymentDate.between(start, end))
            .into_tuple::<Option<f64>>();
        let total = store::run(self.timeout, query.one(&self.db)).await?;
        Ok(total.flatten().unwrap_or(0.0))
    }

    async fn insert(&self, payment_number: String, fields: PaymentFields) -> Result<payment::Model, ServiceError> {
        let am = payment::ActiveModel {
            payment_number: Set(payment_number),
            amount_paid: Set(fields.amount_paid),
            payment_date: Set(fields.payment_date),
            record_number: Set(fields.record_number),
            created_at: Set(Utc::now().into()),
        };
        store::run(self.timeout, am.insert(&self.db)).await
    }

    async fn update(&self, payment_number: &str, fields: PaymentFields) -> Result<bool, ServiceError> {
        store::run(self.timeout, async {
            let Some(found) = payment::Entity::find_by_id(payment_number.to_string()).one(&self.db).await? else {
                return Ok(false);
            };
            let mut am = found.into_active_model();
            am.amount_paid = Set(fields.amount_paid);
            am.payment_date = Set(fields.payment_date);
            am.record_number = Set(fields.record_number);
            am.update(&self.db).await.map(|_| true)
        })
        .await
    }

    async fn delete(&self, payment_number: &str) -> Result<bool, ServiceError> {
        let res =
            store::run(self.timeout, payment::Entity::delete_by_id(payment_number.to_string()).exec(&self.db)).await?;
        Ok(res.rows_affected > 0)
    }
}
