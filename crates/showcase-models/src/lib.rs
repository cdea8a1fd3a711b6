//! Data models for Showcase.
//!
//! Defines the types shared by the server and the client data-access layer:
//! users, projects, bookmarks, the tool catalogue, upload value objects and
//! the `ApiResponse` envelope every endpoint speaks.
//!
//! This crate can be used with or without sqlx support:
//! - Default: No database dependencies, pure data structures
//! - With `sqlx` feature: Adds `FromRow` derive for database mapping

mod bookmark;
mod project;
mod response;
mod tool;
mod upload;
mod user;

pub use bookmark::*;
pub use project::*;
pub use response::*;
pub use tool::*;
pub use upload::*;
pub use user::*;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
