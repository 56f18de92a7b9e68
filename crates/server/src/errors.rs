use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiResponse;
use serde::de::DeserializeOwned;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Everything a handler can fail with, rendered as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Service(e.into())
    }
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Service(ServiceError::Unauthorized("Authentication required".into()))
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::Validation(_) | ServiceError::Referential(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Service(ServiceError::Store(_)) | ApiError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Service(e) => e.public_message().to_string(),
            ApiError::Session(_) => "Server error".to_string(),
            ApiError::BadRequest(m) | ApiError::NotFound(m) => m.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ApiResponse::failure(self.public_message()))).into_response()
    }
}

/// `Json` whose rejections use the response envelope.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::BadRequest("Expected a JSON request body".into()),
        JsonRejection::JsonSyntaxError(_) => ApiError::BadRequest("Invalid JSON body".into()),
        other => ApiError::BadRequest(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ApiError::from(ServiceError::Validation("x".into())), StatusCode::BAD_REQUEST),
            (ApiError::from(ServiceError::referential("Car")), StatusCode::BAD_REQUEST),
            (ApiError::unauthorized(), StatusCode::UNAUTHORIZED),
            (ApiError::from(ServiceError::not_found("Payment")), StatusCode::NOT_FOUND),
            (ApiError::from(ServiceError::Conflict("dup".into())), StatusCode::CONFLICT),
            (ApiError::from(ServiceError::Store("pool timed out".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn store_details_stay_out_of_responses() {
        let err = ApiError::from(ServiceError::Store("relation \"car\" does not exist".into()));
        assert_eq!(err.public_message(), "Server error");
        let err = ApiError::from(AuthError::Conflict("Username already exists".into()));
        assert_eq!(err.public_message(), "Username already exists");
    }
}
