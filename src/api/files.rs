//! Upload URL endpoint.

use axum::{extract::State, routing::post, Extension, Json, Router};
use showcase_models::{ApiResponse, UploadFileRequest, UploadFileResponse};

use crate::{
    error::Result,
    middleware::{limit_uploads, require_auth, AuthUser},
    AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_upload_url))
        // Layers run bottom-up: auth first, then the quota keyed by user.
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            limit_uploads,
        ))
        .layer(axum::middleware::from_fn_with_state(state, require_auth))
}

/// Issue a pre-signed PUT target for one file.
async fn create_upload_url(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<UploadFileRequest>,
) -> Result<Json<ApiResponse<UploadFileResponse>>> {
    let target = state
        .storage
        .create_upload_url(&auth.user_id, &request)
        .await?;

    Ok(Json(ApiResponse::ok(target, "Upload URL generated")))
}
