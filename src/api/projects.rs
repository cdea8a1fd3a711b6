//! Project showcase endpoints.
//!
//! Browsing and search are public. A signed-in viewer also sees whether they
//! have bookmarked a project.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use showcase_models::{
    ApiResponse, CreateProjectRequest, FieldError, Project, ProjectDetail, ProjectPage,
};

use crate::{
    db::{self, CreateProject},
    error::{Error, Result},
    middleware::{optional_auth, require_auth, AuthUser},
    AppState,
};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;
const MAX_TITLE_LEN: usize = 120;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_project))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let public = Router::new()
        .route("/", get(search_projects))
        .route("/:id", get(get_project))
        .layer(axum::middleware::from_fn_with_state(state, optional_auth));

    public.merge(protected)
}

async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<ProjectPage>>> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    let text = query.q.unwrap_or_default();

    let page = db::search_projects(&state.db, &text, limit, offset).await?;
    Ok(Json(ApiResponse::ok(page, "Projects")))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    viewer: Option<Extension<AuthUser>>,
) -> Result<Json<ApiResponse<ProjectDetail>>> {
    let project = db::get_project(&state.db, &id).await?;

    let bookmarked = match viewer {
        Some(Extension(user)) => db::is_bookmarked(&state.db, &user.user_id, &project.id).await?,
        None => false,
    };

    Ok(Json(ApiResponse::ok(
        ProjectDetail {
            project,
            bookmarked,
        },
        "Project found",
    )))
}

async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>)> {
    let title = request.title.trim().to_string();
    let mut errors = Vec::new();

    if title.is_empty() {
        errors.push(FieldError::new("title", "must not be blank"));
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push(FieldError::new("title", "is too long"));
    }

    let mut tools = request.tools;
    tools.sort();
    tools.dedup();
    if db::count_existing_tools(&state.db, &tools).await? != tools.len() {
        errors.push(FieldError::new("tools", "references an unknown tool"));
    }

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let project = db::create_project(
        &state.db,
        CreateProject {
            owner_id: auth.user_id,
            title,
            description: request.description,
            cover_url: request.cover_url,
            tools,
        },
    )
    .await?;

    tracing::info!(project_id = %project.id, owner_id = %project.owner_id, "Project created");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project, "Project created"))))
}
