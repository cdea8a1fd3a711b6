//! Direct-to-storage uploads.

use showcase_models::{ApiResponse, UploadFileRequest, UploadFileResponse, UploadSuccessResponse};
use tracing::info;

use crate::api::ApiClient;
use crate::error::Result;

pub struct FileService<'a> {
    api: &'a ApiClient,
}

impl<'a> FileService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Request a pre-signed target, then PUT the bytes straight to it.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UploadSuccessResponse> {
        let request = UploadFileRequest {
            file_name: file_name.to_string(),
            content_type: content_type.map(str::to_string),
            size: bytes.len() as u64,
        };

        let target = self
            .api
            .post::<ApiResponse<UploadFileResponse>, _>(&["files"], &request)
            .await?
            .into_payload("create upload URL")?;

        self.api
            .put_bytes(&target.upload_url, &target.content_type, bytes)
            .await?;

        info!(key = %target.key, "File uploaded");
        Ok(target.into())
    }
}
