//! Project showcase models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project shown on a member's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    /// Tool ids from the global catalogue
    #[serde(default)]
    pub tools: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// A project as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    /// Whether the viewer has bookmarked it. Always false for anonymous viewers.
    pub bookmarked: bool,
}
