//! Session endpoints.
//!
//! Identities are established by the external sign-in provider, which hands
//! the browser a bearer token. These routes let the client resolve the
//! current user, trade a bearer token for an HttpOnly session cookie, and
//! end the session. `/config` tells the browser which sign-in app to use.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use showcase_models::{ApiResponse, User};

use crate::{
    db,
    error::Result,
    middleware::{require_auth, AuthUser, SESSION_COOKIE_NAME},
    AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/session", post(create_session))
        .layer(axum::middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .merge(protected)
        .route("/config", get(sign_in_config))
        .route("/logout", post(logout))
}

/// Public sign-in settings for the browser.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInConfig {
    pub google_client_id: Option<String>,
}

async fn sign_in_config(State(state): State<AppState>) -> Json<ApiResponse<SignInConfig>> {
    let config = SignInConfig {
        google_client_id: state.google_client_id.clone(),
    };
    Json(ApiResponse::ok(config, "Sign-in configuration"))
}

/// The authenticated user's own record.
async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<User>>> {
    let user = db::get_user(&state.db, &auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user, "Current user")))
}

/// Store a fresh token in the session cookie.
async fn create_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<User>>)> {
    let user = db::get_user(&state.db, &auth.user_id).await?;
    let token = state.auth.issue_token(&user)?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.auth.ttl_seconds()))
        .build();

    tracing::info!(user_id = %user.id, "Session started");

    Ok((jar.add(cookie), Json(ApiResponse::ok(user, "Session started"))))
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<bool>>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (jar, Json(ApiResponse::ok(true, "Logged out")))
}
