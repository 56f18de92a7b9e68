use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::input::loose;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[serde(default, deserialize_with = "loose")]
    pub amount_paid: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub payment_date: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub record_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFields {
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
    pub record_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTotal {
    pub total_revenue: f64,
}
