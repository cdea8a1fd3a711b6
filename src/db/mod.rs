//! Database layer for Showcase.
//!
//! Provides SQLite connection pooling and query modules
//! for all domain entities.

mod bookmarks;
mod pool;
mod projects;
mod tools;
mod users;

pub use bookmarks::*;
pub use pool::{create_pool_with_config, health_check, PoolConfig};
pub use projects::*;
pub use tools::*;
pub use users::*;

use crate::Result;
use tracing::info;

/// Type alias for the SQLite connection pool.
pub type DbPool = sqlx::SqlitePool;

/// Initialize the database connection pool with default settings.
pub async fn init_pool(path: &str) -> Result<DbPool> {
    let pool = create_pool_with_config(path, PoolConfig::default()).await?;

    info!("Database pool initialized: {}", path);

    Ok(pool)
}

/// Initialize the database schema.
///
/// Applies the complete schema from schema.sql. Uses IF NOT EXISTS
/// clauses so it's safe to run multiple times.
pub async fn initialize_schema(pool: &DbPool) -> Result<()> {
    let schema = include_str!("../../schema.sql");

    info!("Initializing database schema");

    for statement in schema_statements(schema) {
        sqlx::query(&statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully");

    Ok(())
}

/// Split a SQL script into statements.
///
/// `--` comments are removed from the whole script first, so a `;` inside a
/// comment never splits a statement.
fn schema_statements(script: &str) -> Vec<String> {
    let without_comments = script
        .lines()
        .map(|line| match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// In-memory pool with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let pool = create_pool_with_config(":memory:", PoolConfig::test())
        .await
        .unwrap();
    initialize_schema(&pool).await.unwrap();
    pool
}
