//! Bookmark queries.
//!
//! A bookmark is unique per (user, project); adding an existing bookmark
//! returns the stored one.

use crate::{Error, Result};
use showcase_models::Bookmark;

use super::DbPool;

/// Bookmark a project for a user. Idempotent.
pub async fn add_bookmark(pool: &DbPool, user_id: &str, project_id: &str) -> Result<Bookmark> {
    sqlx::query(
        r#"
        INSERT INTO bookmarks (id, user_id, project_id, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id, project_id) DO NOTHING
        "#,
    )
    .bind(showcase_models::new_id())
    .bind(user_id)
    .bind(project_id)
    .bind(showcase_models::now())
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Bookmark>(
        "SELECT * FROM bookmarks WHERE user_id = ? AND project_id = ?",
    )
    .bind(user_id)
    .bind(project_id)
    .fetch_one(pool)
    .await
    .map_err(Error::from)
}

/// Remove a bookmark.
pub async fn remove_bookmark(pool: &DbPool, user_id: &str, project_id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND project_id = ?")
        .bind(user_id)
        .bind(project_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Bookmark for project {}", project_id)));
    }

    Ok(())
}

/// Whether a user has bookmarked a project.
pub async fn is_bookmarked(pool: &DbPool, user_id: &str, project_id: &str) -> Result<bool> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT id FROM bookmarks WHERE user_id = ? AND project_id = ?")
            .bind(user_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// List a user's bookmarks, newest first.
pub async fn list_bookmarks(pool: &DbPool, user_id: &str) -> Result<Vec<Bookmark>> {
    sqlx::query_as::<_, Bookmark>(
        "SELECT * FROM bookmarks WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(Error::from)
}
