//! Tool catalogue endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use showcase_models::{ApiResponse, CreateToolRequest, FieldError, Tool};

use crate::{
    db,
    error::{Error, Result},
    middleware::require_auth,
    AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_tool))
        .layer(axum::middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/", get(list_tools))
        .merge(protected)
}

async fn list_tools(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Tool>>>> {
    let tools = db::list_tools(&state.db).await?;
    Ok(Json(ApiResponse::ok(tools, "Tools")))
}

async fn create_tool(
    State(state): State<AppState>,
    Json(request): Json<CreateToolRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tool>>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(Error::Validation(vec![FieldError::new(
            "name",
            "must not be blank",
        )]));
    }

    let icon = request
        .icon
        .as_deref()
        .map(str::trim)
        .filter(|icon| !icon.is_empty());

    let tool = db::create_tool(&state.db, name, icon).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tool, "Tool created"))))
}
