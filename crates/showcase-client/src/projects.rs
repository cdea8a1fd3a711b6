//! Project browsing.

use serde::Serialize;
use showcase_models::{ApiResponse, ProjectDetail, ProjectPage};

use crate::api::ApiClient;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct SearchParams<'q> {
    q: &'q str,
    limit: i64,
    offset: i64,
}

pub struct ProjectService<'a> {
    api: &'a ApiClient,
}

impl<'a> ProjectService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Case-insensitive search over titles and descriptions.
    pub async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<ProjectPage> {
        let params = SearchParams {
            q: query,
            limit,
            offset,
        };

        self.api
            .get_with_query::<ApiResponse<ProjectPage>, _>(&["projects"], &params)
            .await?
            .into_payload("search projects")
    }

    /// One project, with `bookmarked` set for the signed-in viewer.
    pub async fn get(&self, id: &str) -> Result<ProjectDetail> {
        self.api
            .get::<ApiResponse<ProjectDetail>>(&["projects", id])
            .await?
            .into_payload("load project")
    }
}
