use chrono::NaiveDate;
use models::car::{CarSize, CarType};
use models::{payment, service_record};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Entries shown in the "recent" and "popular" panels.
pub const PANEL_SIZE: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_cars: u64,
    pub total_services: u64,
    pub total_revenue: f64,
    pub recent_services: Vec<service_record::Detail>,
    pub recent_payments: Vec<payment::Detail>,
    pub popular_packages: Vec<PackagePopularity>,
}

/// Usage of one package; packages never used report a count of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePopularity {
    pub package_number: String,
    pub package_name: String,
    pub package_price: f64,
    pub service_count: i64,
    /// Package price times the number of services.
    pub total_revenue: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct PopularityRow {
    pub package_number: String,
    pub package_name: String,
    pub package_price: f64,
    pub service_count: i64,
}

impl From<PopularityRow> for PackagePopularity {
    fn from(row: PopularityRow) -> Self {
        Self {
            total_revenue: row.package_price * row.service_count as f64,
            package_number: row.package_number,
            package_name: row.package_name,
            package_price: row.package_price,
            service_count: row.service_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub daily_revenue: f64,
    pub payment_count: i64,
}

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyServices {
    pub date: NaiveDate,
    pub service_count: i64,
}

/// One service of the day; the payment side is empty while unpaid.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportRow {
    pub record_number: String,
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub driver_name: String,
    pub car_type: CarType,
    pub car_size: CarSize,
    pub package_name: String,
    pub package_description: String,
    pub package_price: f64,
    pub payment_number: Option<String>,
    pub amount_paid: Option<f64>,
    pub payment_date: Option<NaiveDate>,
}
