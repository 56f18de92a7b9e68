//! Cookie sessions carrying the signed-in operator.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use service::auth::domain::AuthUser;
use tower_sessions::Session;

use crate::errors::ApiError;

const SESSION_USER_KEY: &str = "auth.user";

/// Bind `user` to the session under a fresh id.
pub async fn establish(session: &Session, user: &AuthUser) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user).await?;
    Ok(())
}

pub async fn current_user(session: &Session) -> Result<Option<AuthUser>, ApiError> {
    Ok(session.get::<AuthUser>(SESSION_USER_KEY).await?)
}

pub async fn destroy(session: &Session) -> Result<(), ApiError> {
    session.flush().await?;
    Ok(())
}

/// Reject requests without a signed-in user; otherwise expose it as an
/// `Extension<AuthUser>` to the handlers.
pub async fn require_session(session: Session, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(user) = current_user(&session).await? else {
        return Err(ApiError::unauthorized());
    };
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
