//! Bookmark model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A user's saved reference to a project. One per (user, project) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /bookmarks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkRequest {
    pub project_id: String,
}
