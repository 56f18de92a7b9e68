use serde::Deserialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest { pub username: String, pub password: String, pub confirm_password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest { pub current_password: String, pub new_password: String }

/// On update an empty or missing password keeps the current one.
#[derive(ToSchema)]
pub struct UserRequest { pub username: String, pub password: Option<String> }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRequest {
    /// Ignored on update; the path carries the plate.
    pub plate_number: String,
    /// Sedan, SUV, Hatchback, Truck, Van, Motorcycle or Other.
    pub car_type: String,
    /// Small, Medium, Large or Extra Large.
    pub car_size: String,
    pub driver_name: String,
    pub phone_number: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    pub package_name: String,
    pub package_description: Option<String>,
    pub package_price: f64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordRequest {
    /// YYYY-MM-DD
    pub service_date: String,
    pub plate_number: String,
    pub package_number: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount_paid: f64,
    /// YYYY-MM-DD
    pub payment_date: String,
    pub record_number: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::logout,
        crate::routes::users::me,
        crate::routes::users::change_password,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::get_one,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::cars::list,
        crate::routes::cars::search,
        crate::routes::cars::get_one,
        crate::routes::cars::create,
        crate::routes::cars::update,
        crate::routes::cars::remove,
        crate::routes::packages::list,
        crate::routes::packages::search,
        crate::routes::packages::get_one,
        crate::routes::packages::create,
        crate::routes::packages::update,
        crate::routes::packages::remove,
        crate::routes::services::list,
        crate::routes::services::by_car,
        crate::routes::services::by_date_range,
        crate::routes::services::get_one,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::remove,
        crate::routes::payments::list,
        crate::routes::payments::by_record,
        crate::routes::payments::by_date_range,
        crate::routes::payments::revenue,
        crate::routes::payments::get_one,
        crate::routes::payments::create,
        crate::routes::payments::update,
        crate::routes::payments::remove,
        crate::routes::dashboard::stats,
        crate::routes::dashboard::revenue,
        crate::routes::dashboard::services,
        crate::routes::dashboard::popularity,
        crate::routes::reports::daily,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ChangePasswordRequest,
            UserRequest,
            CarRequest,
            PackageRequest,
            ServiceRecordRequest,
            PaymentRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "cars"),
        (name = "packages"),
        (name = "services"),
        (name = "payments"),
        (name = "dashboard"),
        (name = "reports")
    )
)]
pub struct ApiDoc;
