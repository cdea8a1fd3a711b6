//! Middleware for Showcase.
//!
//! - `auth` - JWT validation guarding mutation routes
//! - `rate_limit` - Per-user quota on upload URL generation

mod auth;
mod rate_limit;

pub use auth::{optional_auth, require_auth, AuthUser, SESSION_COOKIE_NAME};
pub use rate_limit::limit_uploads;
