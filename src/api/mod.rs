//! API Routes for Showcase
//!
//! This module combines all API routes into a single router.
//! Routes are organized by domain and apply appropriate middleware.

mod auth;
mod bookmarks;
mod files;
mod projects;
pub mod status;
mod tools;
mod users;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{AppState, Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// File bytes go straight to S3, so API bodies are small JSON documents.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The served application: every route plus the HTTP middleware stack.
///
/// Layers are applied innermost first: body limit, timeout, trace, CORS.
pub fn app(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    Ok(Router::new()
        .merge(routes(state.clone()))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin)?)
        .with_state(state))
}

/// Build the complete API router.
///
/// Route structure:
/// - /health - Health check (public)
/// - /auth/* - Current session (auth) and logout
/// - /users/* - Public profiles, profile update (auth)
/// - /files - Pre-signed upload URLs (auth + rate limit)
/// - /bookmarks/* - The caller's bookmarks (auth)
/// - /tools/* - Tool catalogue (public read, auth write)
/// - /projects/* - Project showcase and search (public read, auth write)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/users", users::routes(state.clone()))
        .nest("/files", files::routes(state.clone()))
        .nest("/bookmarks", bookmarks::routes(state.clone()))
        .nest("/tools", tools::routes(state.clone()))
        .nest("/projects", projects::routes(state))
}

/// Cookies only travel cross-origin with credentials, which in turn need an
/// explicit origin.
fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    match origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| Error::Configuration(format!("Invalid CORS_ORIGIN: {}", e)))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true))
        }
        None => Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)),
    }
}
