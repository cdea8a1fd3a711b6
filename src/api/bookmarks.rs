//! Bookmark API endpoints. Every route acts on the caller's own bookmarks.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use showcase_models::{ApiResponse, Bookmark, CreateBookmarkRequest};

use crate::{
    db,
    error::{Error, Result},
    middleware::{require_auth, AuthUser},
    AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookmarks).post(add_bookmark))
        .route("/:project_id", delete(remove_bookmark))
        .layer(axum::middleware::from_fn_with_state(state, require_auth))
}

async fn list_bookmarks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Bookmark>>>> {
    let bookmarks = db::list_bookmarks(&state.db, &auth.user_id).await?;
    Ok(Json(ApiResponse::ok(bookmarks, "Bookmarks")))
}

/// Bookmark a project. Repeating the call returns the existing bookmark.
async fn add_bookmark(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Bookmark>>)> {
    if !db::project_exists(&state.db, &request.project_id).await? {
        return Err(Error::NotFound(format!("Project {}", request.project_id)));
    }

    let bookmark = db::add_bookmark(&state.db, &auth.user_id, &request.project_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(bookmark, "Project bookmarked"))))
}

async fn remove_bookmark(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<bool>>> {
    db::remove_bookmark(&state.db, &auth.user_id, &project_id).await?;
    Ok(Json(ApiResponse::ok(true, "Bookmark removed")))
}
