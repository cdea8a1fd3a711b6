//! The shared tool catalogue.

use showcase_models::{ApiResponse, Tool};

use crate::api::ApiClient;
use crate::error::Result;

pub struct ToolService<'a> {
    api: &'a ApiClient,
}

impl<'a> ToolService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// The full tool catalogue, sorted by name.
    pub async fn list(&self) -> Result<Vec<Tool>> {
        self.api
            .get::<ApiResponse<Vec<Tool>>>(&["tools"])
            .await?
            .into_payload("load tools")
    }
}
