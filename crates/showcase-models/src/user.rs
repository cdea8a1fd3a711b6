//! User and profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A registered member of the platform.
///
/// Serialised with the `_id` key and camelCase field names, which is the
/// shape the web frontend reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        let now = super::now();
        Self {
            id: super::new_id(),
            email: email.into(),
            full_name: full_name.into(),
            username: None,
            bio: None,
            headline: None,
            location: None,
            website: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `other` refers to the same account.
    pub fn is_same_user(&self, other: &User) -> bool {
        self.id == other.id
    }
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.username.is_none()
            && self.bio.is_none()
            && self.headline.is_none()
            && self.location.is_none()
            && self.website.is_none()
            && self.avatar_url.is_none()
    }
}
