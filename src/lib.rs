//! Showcase - Portfolio and Project Showcase Server
//!
//! Profiles, project search, bookmarks and pre-signed uploads behind a JWT
//! session guard.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
