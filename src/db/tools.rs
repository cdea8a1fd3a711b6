//! Tool catalogue queries.

use crate::{Error, Result};
use showcase_models::Tool;

use super::DbPool;

/// Add a tool to the catalogue. Names are unique regardless of case.
pub async fn create_tool(pool: &DbPool, name: &str, icon: Option<&str>) -> Result<Tool> {
    sqlx::query_as::<_, Tool>(
        r#"
        INSERT INTO tools (id, name, icon, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(showcase_models::new_id())
    .bind(name)
    .bind(icon)
    .bind(showcase_models::now())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists(format!("Tool {}", name))
        }
        _ => Error::from(e),
    })
}

/// List the whole catalogue, alphabetically.
pub async fn list_tools(pool: &DbPool) -> Result<Vec<Tool>> {
    sqlx::query_as::<_, Tool>("SELECT * FROM tools ORDER BY lower(name)")
        .fetch_all(pool)
        .await
        .map_err(Error::from)
}

/// Count how many of `ids` exist in the catalogue.
pub async fn count_existing_tools(pool: &DbPool, ids: &[String]) -> Result<usize> {
    let mut found = 0;
    for id in ids {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM tools WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if exists.is_some() {
            found += 1;
        }
    }
    Ok(found)
}
