//! Health endpoint.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use showcase_models::ApiResponse;

use crate::{db, AppState};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Report service and database health.
///
/// An unreachable database answers 503 with the failure envelope.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    if let Err(e) = db::health_check(&state.db).await {
        tracing::warn!(error = %e, "Health check failed");
        let code = StatusCode::SERVICE_UNAVAILABLE;
        let body = ApiResponse::failure("Database unavailable").with_code(code.as_u16());
        return (code, Json(body));
    }

    let status = HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database: true,
    };
    (StatusCode::OK, Json(ApiResponse::ok(status, "ok")))
}
