//! Bookmark operations for the signed-in user.

use showcase_models::{ApiResponse, Bookmark, CreateBookmarkRequest};

use crate::api::ApiClient;
use crate::error::Result;

pub struct BookmarkService<'a> {
    api: &'a ApiClient,
}

impl<'a> BookmarkService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Bookmark>> {
        self.api
            .get::<ApiResponse<Vec<Bookmark>>>(&["bookmarks"])
            .await?
            .into_payload("load bookmarks")
    }

    pub async fn add(&self, project_id: &str) -> Result<Bookmark> {
        let body = CreateBookmarkRequest {
            project_id: project_id.to_string(),
        };

        self.api
            .post::<ApiResponse<Bookmark>, _>(&["bookmarks"], &body)
            .await?
            .into_payload("bookmark project")
    }

    pub async fn remove(&self, project_id: &str) -> Result<()> {
        self.api
            .delete::<ApiResponse<bool>>(&["bookmarks", project_id])
            .await?
            .into_envelope("remove bookmark")?;
        Ok(())
    }

    /// Flip the bookmark state. Returns whether the project is now bookmarked.
    pub async fn toggle(&self, project_id: &str, currently_bookmarked: bool) -> Result<bool> {
        if currently_bookmarked {
            self.remove(project_id).await?;
            Ok(false)
        } else {
            self.add(project_id).await?;
            Ok(true)
        }
    }
}
