use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict(_) => 1002,
            AuthError::NotFound(_) => 1003,
            AuthError::Unauthorized(_) => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ServiceError::Validation(m),
            AuthError::Conflict(m) => ServiceError::Conflict(m),
            AuthError::NotFound(m) => ServiceError::NotFound(m),
            AuthError::Unauthorized(m) => ServiceError::Unauthorized(m),
            other @ (AuthError::HashError(_) | AuthError::Repository(_)) => {
                ServiceError::Store(format!("[{}] {}", other.code(), other))
            }
        }
    }
}

/// Repository failures arrive as store errors; a unique violation on
/// `user.username` is the only conflict the auth tables can raise.
impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Conflict(_) => AuthError::Conflict("Username already exists".into()),
            ServiceError::Validation(m) => AuthError::Validation(m),
            ServiceError::NotFound(m) => AuthError::NotFound(m),
            other => AuthError::Repository(other.to_string()),
        }
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        ServiceError::from(e).into()
    }
}
