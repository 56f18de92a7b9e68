use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::service_record;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "package")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub package_number: String,
    pub package_name: String,
    #[sea_orm(column_type = "Text")]
    pub package_description: String,
    #[sea_orm(column_type = "Double")]
    pub package_price: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceRecord,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRecord => Entity::has_many(service_record::Entity).into(),
        }
    }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
