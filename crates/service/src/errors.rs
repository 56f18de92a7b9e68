use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed, missing or out-of-range input; nothing was read or written.
    #[error("validation error: {0}")]
    Validation(String),
    /// A referenced car, package or service record does not exist.
    #[error("referential error: {0}")]
    Referential(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Duplicate primary or unique key.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Unexpected store failure; the detail is for logs only.
    #[error("store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn referential(entity: &str) -> Self {
        Self::Referential(format!("{} not found", entity))
    }

    /// Message safe to show to API clients.
    pub fn public_message(&self) -> &str {
        match self {
            ServiceError::Validation(m)
            | ServiceError::Referential(m)
            | ServiceError::NotFound(m)
            | ServiceError::Conflict(m)
            | ServiceError::Unauthorized(m) => m,
            ServiceError::Store(_) => "Server error",
        }
    }

    /// Replace the generic text of a store-raised conflict with an entity-specific one.
    pub fn on_conflict(self, message: &str) -> Self {
        match self {
            ServiceError::Conflict(_) => ServiceError::Conflict(message.to_string()),
            other => other,
        }
    }

    /// Same as [`Self::on_conflict`] for foreign-key violations.
    pub fn on_referential(self, message: &str) -> Self {
        match self {
            ServiceError::Referential(_) => ServiceError::Referential(message.to_string()),
            other => other,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Db(db) => db.into(),
        }
    }
}

/// Constraint violations are the authoritative outcome of a lost
/// check-then-insert race.
impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict("Resource already exists".into()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                ServiceError::Referential("Referenced resource does not exist".into())
            }
            _ => ServiceError::Store(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_keeps_message() {
        let err: ServiceError = ModelError::validation("Invalid date format").into();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid date format"));
        assert_eq!(err.public_message(), "Invalid date format");
    }

    #[test]
    fn store_detail_is_hidden() {
        let err: ServiceError = DbErr::Custom("connection reset".into()).into();
        assert!(matches!(err, ServiceError::Store(_)));
        assert_eq!(err.public_message(), "Server error");
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn conflict_message_is_rewritten() {
        let err = ServiceError::Conflict("Resource already exists".into())
            .on_conflict("Car with this plate number already exists");
        assert_eq!(err.public_message(), "Car with this plate number already exists");
        let untouched = ServiceError::not_found("Car").on_conflict("ignored");
        assert_eq!(untouched.public_message(), "Car not found");
    }
}
