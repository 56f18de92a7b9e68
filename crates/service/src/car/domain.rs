use models::car::{CarSize, CarType};
use serde::{Deserialize, Serialize};

use crate::input::loose;

/// Request body for create and update; on update the plate comes from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    #[serde(default, deserialize_with = "loose")]
    pub plate_number: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub car_type: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub car_size: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub driver_name: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub phone_number: Option<String>,
}

/// Validated mutable attributes of a car.
#[derive(Debug, Clone, PartialEq)]
pub struct CarFields {
    pub car_type: CarType,
    pub car_size: CarSize,
    pub driver_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub plate_number: String,
    pub fields: CarFields,
}
