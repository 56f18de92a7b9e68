use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, JoinType, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::car::{self, CarSize, CarType};
use crate::{package, payment};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_record")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub record_number: String,
    pub service_date: Date,
    pub plate_number: String,
    pub package_number: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Car,
    Package,
    Payment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Car => Entity::belongs_to(car::Entity)
                .from(Column::PlateNumber)
                .to(car::Column::PlateNumber)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Package => Entity::belongs_to(package::Entity)
                .from(Column::PackageNumber)
                .to(package::Column::PackageNumber)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Payment => Entity::has_many(payment::Entity).into(),
        }
    }
}

impl Related<car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Package.def()
    }
}

impl Related<payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A service record with its car and package, as every read path returns it.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub record_number: String,
    pub service_date: Date,
    pub plate_number: String,
    pub package_number: String,
    pub created_at: DateTimeWithTimeZone,
    pub driver_name: String,
    pub car_type: CarType,
    pub car_size: CarSize,
    pub package_name: String,
    pub package_description: String,
    pub package_price: f64,
}

/// Base query for [`Detail`]; both joins are inner since a record is
/// meaningless without its car and package.
pub fn find_details() -> Select<Entity> {
    Entity::find()
        .select_only()
        .columns([Column::RecordNumber, Column::ServiceDate, Column::PlateNumber, Column::PackageNumber, Column::CreatedAt])
        .column_as(car::Column::DriverName, "driver_name")
        .column_as(car::Column::CarType, "car_type")
        .column_as(car::Column::CarSize, "car_size")
        .column_as(package::Column::PackageName, "package_name")
        .column_as(package::Column::PackageDescription, "package_description")
        .column_as(package::Column::PackagePrice, "package_price")
        .join(JoinType::InnerJoin, Relation::Car.def())
        .join(JoinType::InnerJoin, Relation::Package.def())
}
