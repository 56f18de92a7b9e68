use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use models::{car, payment, service_record};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::domain::{CarFields, NewCar};
use crate::errors::ServiceError;
use crate::store::{self, contains_ci, DEFAULT_QUERY_TIMEOUT};

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<car::Model>, ServiceError>;
    async fn get(&self, plate_number: &str) -> Result<Option<car::Model>, ServiceError>;
    /// Plate number or driver name containing `term`, case-insensitive.
    async fn search(&self, term: &str) -> Result<Vec<car::Model>, ServiceError>;
    async fn insert(&self, car: NewCar) -> Result<car::Model, ServiceError>;
    async fn update(&self, plate_number: &str, fields: CarFields) -> Result<Option<car::Model>, ServiceError>;
    /// Removes the car with its service records and their payments.
    async fn delete(&self, plate_number: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

impl From<DatabaseConnection> for SeaOrmCarRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn list(&self) -> Result<Vec<car::Model>, ServiceError> {
        store::run(self.timeout, car::Entity::find().order_by_desc(car::Column::CreatedAt).all(&self.db)).await
    }

    async fn get(&self, plate_number: &str) -> Result<Option<car::Model>, ServiceError> {
        store::run(self.timeout, car::Entity::find_by_id(plate_number.to_string()).one(&self.db)).await
    }

    async fn search(&self, term: &str) -> Result<Vec<car::Model>, ServiceError> {
        let query = car::Entity::find()
            .filter(
                Condition::any()
                    .add(contains_ci(car::Column::PlateNumber, term))
                    .add(contains_ci(car::Column::DriverName, term)),
            )
            .order_by_desc(car::Column::CreatedAt);
        store::run(self.timeout, query.all(&self.db)).await
    }

    async fn insert(&self, new: NewCar) -> Result<car::Model, ServiceError> {
        let am = car::ActiveModel {
            plate_number: Set(new.plate_number),
            car_type: Set(new.fields.car_type),
            car_size: Set(new.fields.car_size),
            driver_name: Set(new.fields.driver_name),
            phone_number: Set(new.fields.phone_number),
            created_at: Set(Utc::now().into()),
        };
        store::run(self.timeout, am.insert(&self.db)).await
    }

    async fn update(&self, plate_number: &str, fields: CarFields) -> Result<Option<car::Model>, ServiceError> {
        store::run(self.timeout, async {
            let Some(found) = car::Entity::find_by_id(plate_number.to_string()).one(&self.db).await? else {
                return Ok(None);
            };
            let mut am = found.into_active_model();
            am.car_type = Set(fields.car_type);
            am.car_size = Set(fields.car_size);
            am.driver_name = Set(fields.driver_name);
            am.phone_number = Set(fields.phone_number);
            am.update(&self.db).await.map(Some)
        })
        .await
    }

    async fn delete(&self, plate_number: &str) -> Result<bool, ServiceError> {
        store::run(self.timeout, async {
            let txn = self.db.begin().await?;
            let records: Vec<String> = service_record::Entity::find()
                .select_only()
                .column(service_record::Column::RecordNumber)
                .filter(service_record::Column::PlateNumber.eq(plate_number))
                .into_tuple()
                .all(&txn)
                .await?;
            payment::Entity::delete_many()
                .filter(payment::Column::RecordNumber.is_in(records))
                .exec(&txn)
                .await?;
            service_record::Entity::delete_many()
                .filter(service_record::Column::PlateNumber.eq(plate_number))
                .exec(&txn)
                .await?;
            let res = car::Entity::delete_by_id(plate_number.to_string()).exec(&txn).await?;
            txn.commit().await?;
            Ok::<_, DbErr>(res.rows_affected > 0)
        })
        .await
    }
}
