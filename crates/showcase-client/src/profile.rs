//! Profile operations.

use reqwest::StatusCode;
use showcase_models::{ApiResponse, ProfileUpdate, User};

use crate::api::{failure, ApiClient};
use crate::error::Result;

pub struct UserProfileService<'a> {
    api: &'a ApiClient,
}

impl<'a> UserProfileService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `PUT /users/profile`.
    ///
    /// Only a 200 carrying a successful envelope counts; anything else is an
    /// error.
    pub async fn update_profile(&self, payload: &ProfileUpdate) -> Result<ApiResponse<User>> {
        let response = self
            .api
            .put::<ApiResponse<User>, _>(&["users", "profile"], payload)
            .await?;

        if response.status != StatusCode::OK {
            return Err(failure("update profile", &response.data.message));
        }

        response.into_envelope("update profile")
    }

    /// `GET /users/{id}`.
    pub async fn get_profile(&self, id: &str) -> Result<User> {
        self.api
            .get::<ApiResponse<User>>(&["users", id])
            .await?
            .into_payload("load profile")
    }

    /// `GET /auth/me`: the identity behind the current session.
    pub async fn current_user(&self) -> Result<User> {
        self.api
            .get::<ApiResponse<User>>(&["auth", "me"])
            .await?
            .into_payload("load current user")
    }
}
