//! User database queries.

use crate::{Error, Result};
use showcase_models::{ProfileUpdate, User};

use super::DbPool;

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Create a new user.
pub async fn create_user(pool: &DbPool, input: CreateUser) -> Result<User> {
    let mut user = User::new(input.email, input.full_name);
    user.avatar_url = input.avatar_url;

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, full_name, avatar_url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(&user.avatar_url)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists(format!("User with email {}", user.email))
        }
        _ => Error::from(e),
    })
}

/// Get a user by ID.
pub async fn get_user(pool: &DbPool, id: &str) -> Result<User> {
    get_user_optional(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {}", id)))
}

/// Get a user by ID (optional).
pub async fn get_user_optional(pool: &DbPool, id: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Error::from)
}

/// Make sure a verified subject has a user row, creating it from the token
/// claims on first sight. Existing rows are left untouched.
///
/// Fails with `Forbidden` when the email is already registered under a
/// different id.
pub async fn ensure_user(
    pool: &DbPool,
    id: &str,
    email: &str,
    full_name: &str,
) -> Result<User> {
    if let Some(user) = get_user_optional(pool, id).await? {
        return Ok(user);
    }

    let now = showcase_models::now();
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (id, email, full_name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(full_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    match get_user_optional(pool, id).await? {
        Some(user) => {
            tracing::info!(user_id = %id, "User provisioned from token");
            Ok(user)
        }
        None => {
            tracing::warn!(user_id = %id, "Token email is registered to another user");
            Err(Error::Forbidden)
        }
    }
}

/// Apply a partial profile update. Absent fields keep their stored value.
pub async fn update_profile(pool: &DbPool, id: &str, update: &ProfileUpdate) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            full_name = COALESCE(?, full_name),
            username = COALESCE(?, username),
            bio = COALESCE(?, bio),
            headline = COALESCE(?, headline),
            location = COALESCE(?, location),
            website = COALESCE(?, website),
            avatar_url = COALESCE(?, avatar_url),
            updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&update.full_name)
    .bind(&update.username)
    .bind(&update.bio)
    .bind(&update.headline)
    .bind(&update.location)
    .bind(&update.website)
    .bind(&update.avatar_url)
    .bind(showcase_models::now())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists("Username is already taken".to_string())
        }
        _ => Error::from(e),
    })?
    .ok_or_else(|| Error::NotFound(format!("User {}", id)))
}
