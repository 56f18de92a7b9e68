use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use models::service_record::{self, Detail};
use models::payment;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use super::domain::ServiceRecordFields;
use crate::errors::ServiceError;
use crate::store::{self, DEFAULT_QUERY_TIMEOUT};

/// Read paths return [`Detail`], the record joined to its car and package.
#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Detail>, ServiceError>;
    async fn get(&self, record_number: &str) -> Result<Option<Detail>, ServiceError>;
    async fn exists(&self, record_number: &str) -> Result<bool, ServiceError>;
    async fn by_car(&self, plate_number: &str) -> Result<Vec<Detail>, ServiceError>;
    /// Inclusive on both ends, latest service date first.
    async fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Detail>, ServiceError>;
    async fn insert(&self, record_number: String, fields: ServiceRecordFields)
        -> Result<service_record::Model, ServiceError>;
    async fn update(&self, record_number: &str, fields: ServiceRecordFields) -> Result<bool, ServiceError>;
    /// Removes the record and its payments.
    async fn delete(&self, record_number: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmServiceRecordRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl SeaOrmServiceRecordRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

impl From<DatabaseConnection> for SeaOrmServiceRecordRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl ServiceRecordRepository for SeaOrmServiceRecordRepository {
    async fn list(&self) -> Result<Vec<Detail>, ServiceError> {
        let query = service_record::find_details().order_by_desc(service_record::Column::CreatedAt);
        store::run(self.timeout, query.into_model::<Detail>().all(&self.db)).await
    }

    async fn get(&self, record_number: &str) -> Result<Option<Detail>, ServiceError> {
        let query = service_record::find_details().filter(service_record::Column::RecordNumber.eq(record_number));
        store::run(self.timeout, query.into_model::<Detail>().one(&self.db)).await
    }

    async fn exists(&self, record_number: &str) -> Result<bool, ServiceError> {
        let found = store::run(
            self.timeout,
            service_record::Entity::find_by_id(record_number.to_string()).one(&self.db),
        )
        .await?;
        Ok(found.is_some())
    }

    async fn by_car(&self, plate_number: &str) -> Result<Vec<Detail>, ServiceError> {
        let query = service_record::find_details()
            .filter(service_record::Column::PlateNumber.eq(plate_number))
            .order_by_desc(service_record::Column::CreatedAt);
        store::run(self.timeout, query.into_model::<Detail>().all(&self.db)).await
    }

    async fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Detail>, ServiceError> {
        let query = service_record::find_details()
            .filter(service_record::Column::ServiceDate.between(start, end))
            .order_by_desc(service_record::Column::ServiceDate)
            .order_by_desc(service_record::Column::CreatedAt);
        store::run(self.timeout, query.into_model::<Detail>().all(&self.db)).await
    }

    async fn insert(
        &self,
        record_number: String,
        fields: ServiceRecordFields,
    ) -> Result<service_record::Model, ServiceError> {
        let am = service_record::ActiveModel {
            record_number: Set(record_number),
            service_date: Set(fields.service_date),
            plate_number: Set(fields.plate_number),
            package_number: Set(fields.package_number),
            created_at: Set(Utc::now().into()),
        };
        store::run(self.timeout, am.insert(&self.db)).await
    }

    async fn update(&self, record_number: &str, fields: ServiceRecordFields) -> Result<bool, ServiceError> {
        store::run(self.timeout, async {
            let Some(found) = service_record::Entity::find_by_id(record_number.to_string()).one(&self.db).await? else {
                return Ok(false);
            };
            let mut am = found.into_active_model();
            am.service_date = Set(fields.service_date);
            am.plate_number = Set(fields.plate_number);
            am.package_number = Set(fields.package_number);
            am.update(&self.db).await.map(|_| true)
        })
        .await
    }

    async fn delete(&self, record_number: &str) -> Result<bool, ServiceError> {
        store::run(self.timeout, async {
            let txn = self.db.begin().await?;
            payment::Entity::delete_many()
                .filter(payment::Column::RecordNumber.eq(record_number))
                .exec(&txn)
                .await?;
            let res = service_record::Entity::delete_by_id(record_number.to_string()).exec(&txn).await?;
            txn.commit().await?;
            Ok::<_, DbErr>(res.rows_affected > 0)
        })
        .await
    }
}
