//! Service layer providing the business operations of the car wash on top of models.
//! - Validates input, checks referenced entities, then delegates to repositories.
//! - Repositories are traits so orchestration stays independent of SeaORM.
//! - Every operation returns [`errors::ServiceError`]; the HTTP layer maps it once.

pub mod errors;
pub mod store;
pub mod input;
pub mod auth;
pub mod car;
pub mod package;
pub mod service_record;
pub mod payment;
pub mod dashboard;
#[cfg(test)]
pub mod test_support;
