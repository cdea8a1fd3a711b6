//! Services layer for Showcase.
//!
//! - `auth` - JWT issuance and verification
//! - `storage` - Pre-signed S3 upload targets
//! - `rate_limit` - Per-user upload quotas

mod auth;
mod rate_limit;
mod storage;

pub use auth::{AuthService, Claims};
pub use rate_limit::UploadLimiter;
pub use storage::StorageService;
