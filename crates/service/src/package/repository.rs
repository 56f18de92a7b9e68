use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use models::{package, payment, service_record};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::domain::PackageFields;
use crate::errors::ServiceError;
use crate::store::{self, contains_ci, DEFAULT_QUERY_TIMEOUT};

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<package::Model>, ServiceError>;
    async fn get(&self, package_number: &str) -> Result<Option<package::Model>, ServiceError>;
    /// Name or description containing `term`, case-insensitive.
    async fn search(&self, term: &str) -> Result<Vec<package::Model>, ServiceError>;
    async fn insert(&self, package_number: String, fields: PackageFields) -> Result<package::Model, ServiceError>;
    async fn update(&self, package_number: &str, fields: PackageFields)
        -> Result<Option<package::Model>, ServiceError>;
    /// Removes the package with the service records using it and their payments.
    async fn delete(&self, package_number: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmPackageRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl SeaOrmPackageRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

impl From<DatabaseConnection> for SeaOrmPackageRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl PackageRepository for SeaOrmPackageRepository {
    async fn list(&self) -> Result<Vec<package::Model>, ServiceError> {
        store::run(self.timeout, package::Entity::find().order_by_desc(package::Column::CreatedAt).all(&self.db)).await
    }

    async fn get(&self, package_number: &str) -> Result<Option<package::Model>, ServiceError> {
        store::run(self.timeout, package::Entity::find_by_id(package_number.to_string()).one(&self.db)).await
    }

    async fn search(&self, term: &str) -> Result<Vec<package::Model>, ServiceError> {
        let query = package::Entity::find()
            .filter(
                Condition::any()
                    .add(contains_ci(package::Column::PackageName, term))
                    .add(contains_ci(package::Column::PackageDescription, term)),
            )
            .order_by_desc(package::Column::CreatedAt);
        store::run(self.timeout, query.all(&self.db)).await
    }

    async fn insert(&self, package_number: String, fields: PackageFields) -> Result<package::Model, ServiceError> {
        let am = package::ActiveModel {
            package_number: Set(package_number),
            package_name: Set(fields.package_name),
            package_description: Set(fields.package_description),
            package_price: Set(fields.package_price),
            created_at: Set(Utc::now().into()),
        };
        store::run(self.timeout, am.insert(&self.db)).await
    }

    async fn update(
        &self,
        package_number: &str,
        fields: PackageFields,
    ) -> Result<Option<package::Model>, ServiceError> {
        store::run(self.timeout, async {
            let Some(found) = package::Entity::find_by_id(package_number.to_string()).one(&self.db).await? else {
                return Ok(None);
            };
            let mut am = found.into_active_model();
            am.package_name = Set(fields.package_name);
            am.package_description = Set(fields.package_description);
            am.package_price = Set(fields.package_price);
            am.update(&self.db).await.map(Some)
        })
        .await
    }

    async fn delete(&self, package_number: &str) -> Result<bool, ServiceError> {
        store::run(self.timeout, async {
            let txn = self.db.begin().await?;
            let records: Vec<String> = service_record::Entity::find()
                .select_only()
                .column(service_record::Column::RecordNumber)
                .filter(service_record::Column::PackageNumber.eq(package_number))
                .into_tuple()
                .all(&txn)
                .await?;
            payment::Entity::delete_many()
                .filter(payment::Column::RecordNumber.is_in(records))
                .exec(&txn)
                .await?;
            service_record::Entity::delete_many()
                .filter(service_record::Column::PackageNumber.eq(package_number))
                .exec(&txn)
                .await?;
            let res = package::Entity::delete_by_id(package_number.to_string()).exec(&txn).await?;
            txn.commit().await?;
            Ok::<_, DbErr>(res.rows_affected > 0)
        })
        .await
    }
}
