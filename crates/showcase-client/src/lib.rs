//! Client-side data access for the Showcase API.
//!
//! Every call goes through one [`ApiClient`] which owns the base URL, the
//! session cookie jar and the JSON headers. Services on top of it map one
//! domain operation to one HTTP call and reject anything that is not a
//! successful envelope.

mod api;
mod bookmarks;
mod config;
mod error;
mod files;
pub mod format;
mod profile;
mod projects;
mod session;
mod tools;

pub use api::{ApiClient, HttpResponse};
pub use bookmarks::BookmarkService;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use files::FileService;
pub use format::format_date;
pub use profile::UserProfileService;
pub use projects::ProjectService;
pub use session::{is_external_profile, SessionContext, SessionState};
pub use tools::ToolService;
