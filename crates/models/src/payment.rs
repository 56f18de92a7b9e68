use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, JoinType, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::car::{self, CarType};
use crate::{package, service_record};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub payment_number: String,
    #[sea_orm(column_type = "Double")]
    pub amount_paid: f64,
    pub payment_date: Date,
    pub record_number: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceRecord,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRecord => Entity::belongs_to(service_record::Entity)
                .from(Column::RecordNumber)
                .to(service_record::Column::RecordNumber)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A payment together with the visit it settles.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub payment_number: String,
    pub amount_paid: f64,
    pub payment_date: Date,
    pub record_number: String,
    pub created_at: DateTimeWithTimeZone,
    pub service_date: Date,
    pub plate_number: String,
    pub driver_name: String,
    pub car_type: CarType,
    pub package_name: String,
    pub package_price: f64,
}

pub fn find_details() -> Select<Entity> {
    Entity::find()
        .select_only()
        .columns([Column::PaymentNumber, Column::AmountPaid, Column::PaymentDate, Column::RecordNumber, Column::CreatedAt])
        .column_as(service_record::Column::ServiceDate, "service_date")
        .column_as(service_record::Column::PlateNumber, "plate_number")
        .column_as(car::Column::DriverName, "driver_name")
        .column_as(car::Column::CarType, "car_type")
        .column_as(package::Column::PackageName, "package_name")
        .column_as(package::Column::PackagePrice, "package_price")
        .join(JoinType::InnerJoin, Relation::ServiceRecord.def())
        .join(JoinType::InnerJoin, service_record::Relation::Car.def())
        .join(JoinType::InnerJoin, service_record::Relation::Package.def())
}
