//! Client-held session state.
//!
//! `is_loading` is true until the first [`SessionContext::load`] resolves;
//! after that `user` is either the signed-in identity or `None`.

use std::sync::Arc;

use once_cell::sync::Lazy;
use reqwest::StatusCode;
use showcase_models::{ApiResponse, User};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::Result;
use crate::profile::UserProfileService;

static GLOBAL: Lazy<SessionContext> = Lazy::new(SessionContext::new);

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide session.
    pub fn global() -> &'static SessionContext {
        &GLOBAL
    }

    /// Resolve the session against `GET /auth/me`.
    ///
    /// A 401 simply means nobody is signed in. Other failures also leave the
    /// session empty but are logged.
    pub async fn load(&self, api: &ApiClient) -> Option<User> {
        self.state.write().await.is_loading = true;

        let user = match UserProfileService::new(api).current_user().await {
            Ok(user) => Some(user),
            Err(e) if e.status() == Some(StatusCode::UNAUTHORIZED) => {
                debug!("No active session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load session");
                None
            }
        };

        let mut state = self.state.write().await;
        state.user = user.clone();
        state.is_loading = false;
        user
    }

    pub async fn set_user(&self, user: User) {
        let mut state = self.state.write().await;
        state.user = Some(user);
        state.is_loading = false;
    }

    /// `POST /auth/logout`, then drop the bearer token and the identity.
    ///
    /// Local state is cleared even when the server call fails.
    pub async fn logout(&self, api: &ApiClient) -> Result<()> {
        let result = api
            .post::<ApiResponse<bool>, _>(&["auth", "logout"], &())
            .await
            .and_then(|response| response.into_envelope("log out"));

        api.clear_token().await;
        self.clear().await;
        result.map(|_| ())
    }

    /// Forget the identity, e.g. after logout.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.user = None;
        state.is_loading = false;
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Whether `profile` belongs to someone other than the session user.
    pub async fn is_external_profile(&self, profile: &User) -> bool {
        is_external_profile(self.state.read().await.user.as_ref(), profile)
    }
}

/// True when nobody is signed in or `profile` is another user's.
///
/// For display only. Never use it to authorize anything.
pub fn is_external_profile(session_user: Option<&User>, profile: &User) -> bool {
    session_user.map_or(true, |user| !user.is_same_user(profile))
}
