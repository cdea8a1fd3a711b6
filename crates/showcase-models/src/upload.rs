//! Upload value objects. Never persisted.

use serde::{Deserialize, Serialize};

/// Body of `POST /files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    pub file_name: String,
    /// Guessed from `file_name` when absent
    #[serde(default)]
    pub content_type: Option<String>,
    pub size: u64,
}

/// A pre-signed upload target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    /// Pre-signed URL accepting a single PUT
    pub upload_url: String,
    /// Object key inside the bucket
    pub key: String,
    /// Public URL the object is served from once uploaded
    pub file_url: String,
    pub content_type: String,
    /// Seconds until `upload_url` stops being accepted
    pub expires_in: u64,
}

/// Outcome of a completed upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSuccessResponse {
    pub key: String,
    pub file_url: String,
}

impl From<UploadFileResponse> for UploadSuccessResponse {
    fn from(target: UploadFileResponse) -> Self {
        Self {
            key: target.key,
            file_url: target.file_url,
        }
    }
}
