//! JWT authentication middleware.
//!
//! Guards mutation routes. A request is either:
//! - unauthenticated: no credential, or a malformed, forged or expired one.
//!   Rejected with 401 before the handler runs.
//! - authenticated: the decoded claims are attached to the request as
//!   `AuthUser` and the request proceeds.
//!
//! Credentials are read from `Authorization: Bearer {jwt}` first, then from
//! the `showcase_token` cookie set for browser sessions.
//!
//! Identities come from the external sign-in provider, so the first verified
//! request for a subject creates its user row from the token claims.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{db, error::Error, services::Claims, AppState};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "showcase_token";

/// Identity injected into request extensions after successful validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Extract the credential from the Authorization header or session cookie.
fn extract_token(req: &Request<Body>, jar: &CookieJar) -> Option<String> {
    if let Some(auth_header) = req.headers().get(AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Middleware that requires a valid session token.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - No bearer header or session cookie present
/// - Token signature doesn't verify
/// - Token is expired
///
/// Returns 403 Forbidden if the token's email already belongs to a different
/// user id.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use showcase::middleware::require_auth;
///
/// let app = Router::new()
///     .route("/users/profile", put(update_profile))
///     .layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let token = extract_token(&req, &jar).ok_or(Error::Unauthenticated)?;

    let claims = state.auth.verify(&token)?;
    db::ensure_user(&state.db, &claims.sub, &claims.email, &claims.name).await?;
    req.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(req).await)
}

/// Optional auth - never rejects, attaches `AuthUser` when a valid token is
/// present.
pub async fn optional_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&req, &jar) {
        if let Ok(claims) = state.auth.verify(&token) {
            req.extensions_mut().insert(AuthUser::from(claims));
        }
    }

    next.run(req).await
}
