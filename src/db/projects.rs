//! Project showcase queries.

use chrono::{DateTime, Utc};
use showcase_models::{Project, ProjectPage};
use sqlx::FromRow;

use crate::{Error, Result};

use super::DbPool;

/// Database row for projects. `tool_ids` holds a JSON array.
#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    owner_id: String,
    title: String,
    description: Option<String>,
    cover_url: Option<String>,
    tool_ids: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            cover_url: row.cover_url,
            tools: serde_json::from_str(&row.tool_ids).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub tools: Vec<String>,
}

/// Create a new project.
pub async fn create_project(pool: &DbPool, input: CreateProject) -> Result<Project> {
    let now = showcase_models::now();
    let tool_ids = serde_json::to_string(&input.tools)?;

    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (id, owner_id, title, description, cover_url, tool_ids, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(showcase_models::new_id())
    .bind(&input.owner_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.cover_url)
    .bind(&tool_ids)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Get a project by ID.
pub async fn get_project(pool: &DbPool, id: &str) -> Result<Project> {
    sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Project::from)
        .ok_or_else(|| Error::NotFound(format!("Project {}", id)))
}

/// Whether a project exists.
pub async fn project_exists(pool: &DbPool, id: &str) -> Result<bool> {
    let row: Option<(String,)> = sqlx::query_as("SELECT id FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Search projects by title or description, newest first.
///
/// An empty query matches every project.
pub async fn search_projects(
    pool: &DbPool,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<ProjectPage> {
    let needle = query.trim();

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM projects
        WHERE ? = ''
           OR instr(lower(title), lower(?)) > 0
           OR instr(lower(COALESCE(description, '')), lower(?)) > 0
        "#,
    )
    .bind(needle)
    .bind(needle)
    .bind(needle)
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT * FROM projects
        WHERE ? = ''
           OR instr(lower(title), lower(?)) > 0
           OR instr(lower(COALESCE(description, '')), lower(?)) > 0
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(needle)
    .bind(needle)
    .bind(needle)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(ProjectPage {
        projects: rows.into_iter().map(Project::from).collect(),
        total,
        limit,
        offset,
    })
}
