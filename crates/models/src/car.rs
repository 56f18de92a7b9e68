use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::service_record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CarType {
    #[sea_orm(string_value = "Sedan")]
    Sedan,
    #[sea_orm(string_value = "SUV")]
    #[serde(rename = "SUV")]
    Suv,
    #[sea_orm(string_value = "Hatchback")]
    Hatchback,
    #[sea_orm(string_value = "Truck")]
    Truck,
    #[sea_orm(string_value = "Van")]
    Van,
    #[sea_orm(string_value = "Motorcycle")]
    Motorcycle,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CarSize {
    #[sea_orm(string_value = "Small")]
    Small,
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "Large")]
    Large,
    #[sea_orm(string_value = "Extra Large")]
    #[serde(rename = "Extra Large")]
    ExtraLarge,
}

impl CarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Sedan => "Sedan",
            CarType::Suv => "SUV",
            CarType::Hatchback => "Hatchback",
            CarType::Truck => "Truck",
            CarType::Van => "Van",
            CarType::Motorcycle => "Motorcycle",
            CarType::Other => "Other",
        }
    }
}

impl CarSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarSize::Small => "Small",
            CarSize::Medium => "Medium",
            CarSize::Large => "Large",
            CarSize::ExtraLarge => "Extra Large",
        }
    }
}

impl FromStr for CarType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarType::iter().find(|t| t.as_str() == s).ok_or_else(|| {
            let allowed: Vec<&str> = CarType::iter().map(|t| t.as_str()).collect();
            ModelError::validation(format!("Car type must be one of: {}", allowed.join(", ")))
        })
    }
}

impl FromStr for CarSize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarSize::iter().find(|t| t.as_str() == s).ok_or_else(|| {
            let allowed: Vec<&str> = CarSize::iter().map(|t| t.as_str()).collect();
            ModelError::validation(format!("Car size must be one of: {}", allowed.join(", ")))
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub plate_number: String,
    pub car_type: CarType,
    pub car_size: CarSize,
    pub driver_name: String,
    pub phone_number: String,
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
