use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::input::loose;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordInput {
    #[serde(default, deserialize_with = "loose")]
    pub service_date: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub plate_number: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub package_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecordFields {
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub package_number: String,
}
