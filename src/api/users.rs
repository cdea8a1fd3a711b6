//! User profile API endpoints.
//!
//! Profiles are public to read. Updating requires a session and only ever
//! touches the caller's own record.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use showcase_models::{ApiResponse, FieldError, ProfileUpdate, User};

use crate::{
    db,
    error::{Error, Result},
    middleware::{require_auth, AuthUser},
    AppState,
};

const MAX_NAME_LEN: usize = 100;
const MAX_USERNAME_LEN: usize = 32;
const MAX_SHORT_FIELD_LEN: usize = 200;
const MAX_BIO_LEN: usize = 2000;

// ============================================================================
// Routes
// ============================================================================

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/profile", put(update_profile))
        .layer(axum::middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .merge(protected)
        .route("/:id", get(get_user))
}

// ============================================================================
// Handlers
// ============================================================================

/// Public profile lookup.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let user = db::get_user(&state.db, &id).await?;
    Ok(Json(ApiResponse::ok(user, "User found")))
}

/// Update the caller's profile with the fields present in the body.
async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<ProfileUpdate>,
) -> Result<Json<ApiResponse<User>>> {
    let update = normalize(request);
    validate(&update)?;

    let user = db::update_profile(&state.db, &auth.user_id, &update).await?;
    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(ApiResponse::ok(user, "Profile updated successfully")))
}

// ============================================================================
// Validation
// ============================================================================

/// Trim every field. `fullName` keeps an empty value so validation can
/// reject it; other fields treat blank as "not provided".
fn normalize(update: ProfileUpdate) -> ProfileUpdate {
    fn trim(value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    ProfileUpdate {
        full_name: update.full_name.map(|v| v.trim().to_string()),
        username: trim(update.username),
        bio: trim(update.bio),
        headline: trim(update.headline),
        location: trim(update.location),
        website: trim(update.website),
        avatar_url: trim(update.avatar_url),
    }
}

fn validate(update: &ProfileUpdate) -> Result<()> {
    let mut errors = Vec::new();

    if let Some(name) = &update.full_name {
        if name.is_empty() {
            errors.push(FieldError::new("fullName", "must not be blank"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new("fullName", "is too long"));
        }
    }

    if let Some(username) = &update.username {
        let valid_chars = username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_chars || username.len() > MAX_USERNAME_LEN {
            errors.push(FieldError::new(
                "username",
                "may only contain letters, digits, '_' and '-' (max 32)",
            ));
        }
    }

    for (field, value) in [
        ("headline", &update.headline),
        ("location", &update.location),
    ] {
        if value.as_ref().is_some_and(|v| v.chars().count() > MAX_SHORT_FIELD_LEN) {
            errors.push(FieldError::new(field, "is too long"));
        }
    }

    if update
        .bio
        .as_ref()
        .is_some_and(|v| v.chars().count() > MAX_BIO_LEN)
    {
        errors.push(FieldError::new("bio", "is too long"));
    }

    for (field, value) in [
        ("website", &update.website),
        ("avatarUrl", &update.avatar_url),
    ] {
        if let Some(url) = value {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                errors.push(FieldError::new(field, "must be an http(s) URL"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}
