//! Tool catalogue model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A technology or tool that projects can reference. Global, not owned by
/// any user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /tools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateToolRequest {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}
