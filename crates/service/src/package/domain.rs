use serde::{Deserialize, Serialize};

use crate::input::loose;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInput {
    #[serde(default, deserialize_with = "loose")]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub package_description: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub package_price: Option<String>,
}

/// Validated package attributes; the description is empty when omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageFields {
    pub package_name: String,
    pub package_description: String,
    pub package_price: f64,
}
