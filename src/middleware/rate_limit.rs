//! Upload rate limiting middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::AuthUser;
use crate::{error::Error, AppState};

/// Middleware that enforces the per-user upload quota.
///
/// Must be used AFTER `require_auth`; the quota is keyed by user id.
///
/// # Errors
///
/// Returns 429 Too Many Requests once the quota for the current window is
/// spent.
pub async fn limit_uploads(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| Error::Internal("limit_uploads must be used after require_auth".into()))?;

    if !state.upload_limiter.check(&user.user_id) {
        tracing::warn!(user_id = %user.user_id, "Upload rate limit exceeded");
        return Err(Error::RateLimitExceeded);
    }

    Ok(next.run(req).await)
}
