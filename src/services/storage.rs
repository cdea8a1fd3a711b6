//! Object storage for user uploads.
//!
//! The server never receives file bytes. It hands out a pre-signed S3 PUT
//! URL scoped to one object key and one content type; the browser uploads
//! directly and later references the public file URL.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use showcase_models::{FieldError, UploadFileRequest, UploadFileResponse};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::{Error, Result};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const MAX_FILE_NAME_LEN: usize = 100;

/// Service issuing pre-signed upload targets.
#[derive(Clone)]
pub struct StorageService {
    client: S3Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a storage service using the default AWS credential chain.
    pub async fn from_env(config: &StorageConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        info!(bucket = %config.bucket, region = %config.region, "S3 storage configured");

        Self::with_client(S3Client::new(&sdk_config), config.clone())
    }

    /// Create a storage service around an existing client.
    pub fn with_client(client: S3Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Validate an upload request and pre-sign a PUT for it.
    pub async fn create_upload_url(
        &self,
        user_id: &str,
        request: &UploadFileRequest,
    ) -> Result<UploadFileResponse> {
        let content_type = self.validate(request)?;
        let key = object_key(user_id, &request.file_name);

        let presigning =
            PresigningConfig::expires_in(Duration::from_secs(self.config.upload_url_ttl_seconds))
                .map_err(|e| Error::Storage(format!("Invalid presigning config: {}", e)))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(&content_type)
            .presigned(presigning)
            .await
            .map_err(|e| Error::Storage(format!("Failed to presign upload: {}", e)))?;

        debug!(user_id, key = %key, content_type = %content_type, "Issued upload URL");

        Ok(UploadFileResponse {
            upload_url: presigned.uri().to_string(),
            file_url: self.public_url(&key),
            key,
            content_type,
            expires_in: self.config.upload_url_ttl_seconds,
        })
    }

    /// Public URL an object is served from.
    pub fn public_url(&self, key: &str) -> String {
        match self.config.cloudfront_domain.as_deref() {
            Some(domain) if !domain.trim().is_empty() => {
                let host = domain
                    .trim()
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .trim_end_matches('/');
                format!("https://{}/{}", host, key)
            }
            _ => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.config.bucket, self.config.region, key
            ),
        }
    }

    /// Resolve the content type and check type and size limits.
    fn validate(&self, request: &UploadFileRequest) -> Result<String> {
        if request.file_name.trim().is_empty() {
            return Err(Error::Validation(vec![FieldError::new(
                "fileName",
                "must not be blank",
            )]));
        }

        if request.size == 0 {
            return Err(Error::Validation(vec![FieldError::new(
                "size",
                "must be greater than zero",
            )]));
        }

        if request.size > self.config.max_upload_size {
            return Err(Error::FileTooLarge {
                max_size: self.config.max_upload_size,
            });
        }

        let content_type = resolve_content_type(request);
        if !is_allowed(&self.config.allowed_content_types, &content_type) {
            return Err(Error::InvalidFileType(content_type));
        }

        Ok(content_type)
    }
}

/// Declared content type, or one guessed from the file name.
fn resolve_content_type(request: &UploadFileRequest) -> String {
    request
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or("").trim().to_lowercase())
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| {
            mime_guess::from_path(&request.file_name)
                .first_raw()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string()
        })
}

/// Allowed entries are exact types or `type/*` wildcards.
fn is_allowed(allowed: &[String], content_type: &str) -> bool {
    allowed.iter().any(|entry| match entry.strip_suffix("/*") {
        Some(prefix) => content_type
            .split_once('/')
            .map(|(major, _)| major == prefix)
            .unwrap_or(false),
        None => entry == content_type,
    })
}

/// `uploads/<user>/<uuid>-<name>`
fn object_key(user_id: &str, file_name: &str) -> String {
    format!(
        "uploads/{}/{}-{}",
        user_id,
        showcase_models::new_id(),
        sanitize_file_name(file_name)
    )
}

/// Keep the last path segment, lowercased, limited to `[a-z0-9._-]`.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);

    let mut out = String::with_capacity(base.len());
    for c in base.chars().flat_map(char::to_lowercase) {
        let mapped = if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
            c
        } else {
            '-'
        };
        if mapped == '-' && out.ends_with('-') {
            continue;
        }
        out.push(mapped);
    }

    let trimmed: String = out
        .trim_matches(|c: char| c == '-' || c == '.')
        .chars()
        .take(MAX_FILE_NAME_LEN)
        .collect();

    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
fn test_client() -> S3Client {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .build();
    S3Client::from_conf(config)
}

#[cfg(test)]
fn test_config() -> StorageConfig {
    StorageConfig {
        bucket: "showcase-test".to_string(),
        region: "us-east-1".to_string(),
        cloudfront_domain: None,
        upload_url_ttl_seconds: 300,
        max_upload_size: 1024,
        allowed_content_types: vec!["image/*".to_string(), "application/pdf".to_string()],
    }
}
