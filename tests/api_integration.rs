//! API Integration Tests for the Showcase Server
//!
//! Tests the REST API endpoints using axum-test against an in-memory SQLite
//! database and an offline S3 presigner.

mod common;

use axum::http::{
    header::{AUTHORIZATION, ORIGIN},
    HeaderValue, StatusCode,
};
use common::{
    bearer_auth, full_app_server, seed_user, test_server, test_state, CORS_ORIGIN,
    GOOGLE_CLIENT_ID, TEST_SECRET, UPLOADS_PER_MINUTE,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use showcase::api::MAX_BODY_BYTES;
use showcase::db::{self, CreateProject};
use showcase::middleware::SESSION_COOKIE_NAME;
use showcase::services::Claims;

fn signed_token(secret: &str, sub: &str, exp_offset: i64) -> String {
    signed_token_for(secret, sub, "ada@example.com", "Ada Lovelace", exp_offset)
}

fn signed_token_for(secret: &str, sub: &str, email: &str, name: &str, exp_offset: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        iat: now,
        exp: now + exp_offset,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let state = test_state().await;
    let server = test_server(&state);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let state = test_state().await;
    let server = test_server(&state);
    state.db.close().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 503);
    assert_eq!(body["message"], "Database unavailable");
    assert!(body.get("data").is_none());
}

// ============================================================================
// Middleware stack
// ============================================================================

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let state = test_state().await;
    let server = full_app_server(&state);

    let response = server
        .get("/health")
        .add_header(ORIGIN, HeaderValue::from_static(CORS_ORIGIN))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), CORS_ORIGIN);
    assert_eq!(response.header("access-control-allow-credentials"), "true");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let state = test_state().await;
    let server = full_app_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "bio": "x".repeat(MAX_BODY_BYTES + 1) }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let stored = db::get_user(&state.db, &user.id).await.unwrap();
    assert!(stored.bio.is_none());
}

// ============================================================================
// Auth guard
// ============================================================================

#[tokio::test]
async fn test_profile_update_requires_auth() {
    let state = test_state().await;
    let server = test_server(&state);

    let response = server
        .put("/users/profile")
        .json(&json!({ "fullName": "Nobody" }))
        .await;

    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 401);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, _) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let token = signed_token(TEST_SECRET, &user.id, -60);
    let response = server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "fullName": "Should Not Apply" }))
        .await;

    response.assert_status_unauthorized();
    let stored = db::get_user(&state.db, &user.id).await.unwrap();
    assert_eq!(stored.full_name, "Ada Lovelace");
}

#[tokio::test]
async fn test_forged_token_is_rejected() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, _) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let token = signed_token("some-other-secret", &user.id, 3600);
    let response = server
        .get("/auth/me")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .get("/auth/me")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["_id"], user.id);
    assert_eq!(body["data"]["fullName"], "Ada Lovelace");
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .post("/auth/session")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    response.assert_status_ok();

    let cookie = response.cookie(SESSION_COOKIE_NAME);
    assert_eq!(cookie.http_only(), Some(true));

    let response = server.get("/auth/me").add_cookie(cookie).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["_id"], user.id);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let session = server
        .post("/auth/session")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await
        .cookie(SESSION_COOKIE_NAME);
    assert!(!session.value().is_empty());

    let response = server.post("/auth/logout").add_cookie(session).await;

    response.assert_status_ok();
    let cleared = response.cookie(SESSION_COOKIE_NAME);
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
}

#[tokio::test]
async fn test_sign_in_config_is_public() {
    let state = test_state().await;
    let server = test_server(&state);

    let response = server.get("/auth/config").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["googleClientId"], GOOGLE_CLIENT_ID);
}

#[tokio::test]
async fn test_first_request_provisions_user_from_token() {
    let state = test_state().await;
    let server = test_server(&state);
    let token = signed_token_for(
        TEST_SECRET,
        "google-1234",
        "grace@example.com",
        "Grace Hopper",
        3600,
    );

    let response = server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "headline": "Compiler pioneer" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["_id"], "google-1234");
    assert_eq!(body["data"]["email"], "grace@example.com");
    assert_eq!(body["data"]["fullName"], "Grace Hopper");
    assert_eq!(body["data"]["headline"], "Compiler pioneer");

    server
        .post("/projects")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "title": "A-0 System" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_token_for_taken_email_is_forbidden() {
    let state = test_state().await;
    let server = test_server(&state);
    seed_user(&state, "ada@example.com", "Ada Lovelace").await;
    let token = signed_token(TEST_SECRET, "someone-else", 3600);

    let response = server
        .get("/auth/me")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], 403);
    assert!(db::get_user_optional(&state.db, "someone-else")
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// Profiles
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "fullName": "Ada King",
            "username": "ada",
            "headline": "Analyst",
            "website": "https://ada.dev"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["data"]["_id"], user.id);
    assert_eq!(body["data"]["fullName"], "Ada King");
    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["email"], "ada@example.com");

    let public = server.get(&format!("/users/{}", user.id)).await;
    public.assert_status_ok();
    assert_eq!(public.json::<Value>()["data"]["headline"], "Analyst");
}

#[tokio::test]
async fn test_update_profile_validation() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "fullName": "   ", "website": "not-a-url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["fullName", "website"]);
}

#[tokio::test]
async fn test_username_must_be_unique() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, ada) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;
    let (_, grace) = seed_user(&state, "grace@example.com", "Grace Hopper").await;

    server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&ada))
        .json(&json!({ "username": "pioneer" }))
        .await
        .assert_status_ok();

    let response = server
        .put("/users/profile")
        .add_header(AUTHORIZATION, bearer_auth(&grace))
        .json(&json!({ "username": "pioneer" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let state = test_state().await;
    let server = test_server(&state);

    let response = server.get("/users/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["success"], false);
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_url_generation() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .post("/files")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "fileName": "My Avatar.png", "size": 2048 }))
        .await;

    response.assert_status_ok();
    let data = &response.json::<Value>()["data"];
    let key = data["key"].as_str().unwrap();
    assert!(key.starts_with(&format!("uploads/{}/", user.id)));
    assert_eq!(data["contentType"], "image/png");
    assert_eq!(
        data["fileUrl"],
        format!("https://cdn.example.com/{}", key)
    );
    assert!(data["uploadUrl"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Signature="));
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let state = test_state().await;
    let server = test_server(&state);

    let response = server
        .post("/files")
        .json(&json!({ "fileName": "a.png", "size": 1 }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .post("/files")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "fileName": "run.exe", "contentType": "application/x-msdownload", "size": 10 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rate_limit_is_per_user() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, ada) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;
    let (_, grace) = seed_user(&state, "grace@example.com", "Grace Hopper").await;
    let body = json!({ "fileName": "a.png", "size": 1 });

    for _ in 0..UPLOADS_PER_MINUTE {
        server
            .post("/files")
            .add_header(AUTHORIZATION, bearer_auth(&ada))
            .json(&body)
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/files")
        .add_header(AUTHORIZATION, bearer_auth(&ada))
        .json(&body)
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.json::<Value>()["code"], 429);

    server
        .post("/files")
        .add_header(AUTHORIZATION, bearer_auth(&grace))
        .json(&body)
        .await
        .assert_status_ok();
}

// ============================================================================
// Tools, projects and bookmarks
// ============================================================================

#[tokio::test]
async fn test_tool_catalogue() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    for name in ["Rust", "figma"] {
        server
            .post("/tools")
            .add_header(AUTHORIZATION, bearer_auth(&token))
            .json(&json!({ "name": name }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    server
        .post("/tools")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "name": "rust" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .post("/tools")
        .json(&json!({ "name": "Anonymous" }))
        .await
        .assert_status_unauthorized();

    let response = server.get("/tools").await;
    response.assert_status_ok();
    let names: Vec<String> = response.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["figma", "Rust"]);
}

#[tokio::test]
async fn test_project_create_and_search() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;
    let tool = db::create_tool(&state.db, "Rust", None).await.unwrap();

    let response = server
        .post("/projects")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({
            "title": "Terminal Portfolio",
            "description": "A CLI that renders my work",
            "tools": [tool.id]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["data"]["ownerId"], user.id);
    assert_eq!(created["data"]["tools"], json!([tool.id]));

    server
        .post("/projects")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "title": "Bad tools", "tools": ["Nonexistent"] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/projects").add_query_param("q", "cli").await;
    response.assert_status_ok();
    let page = &response.json::<Value>()["data"];
    assert_eq!(page["total"], 1);
    assert_eq!(page["projects"][0]["title"], "Terminal Portfolio");

    let response = server.get("/projects").add_query_param("q", "gardening").await;
    assert_eq!(response.json::<Value>()["data"]["total"], 0);
}

#[tokio::test]
async fn test_bookmark_flow() {
    let state = test_state().await;
    let server = test_server(&state);
    let (user, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;
    let project = db::create_project(
        &state.db,
        CreateProject {
            owner_id: user.id.clone(),
            title: "Bookmarked".to_string(),
            description: None,
            cover_url: None,
            tools: vec![],
        },
    )
    .await
    .unwrap();

    // Bookmarking twice keeps a single bookmark
    for _ in 0..2 {
        server
            .post("/bookmarks")
            .add_header(AUTHORIZATION, bearer_auth(&token))
            .json(&json!({ "projectId": project.id }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/bookmarks")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"].as_array().unwrap().len(), 1);

    let detail = server
        .get(&format!("/projects/{}", project.id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await;
    detail.assert_status_ok();
    assert_eq!(detail.json::<Value>()["data"]["bookmarked"], true);

    let anonymous = server.get(&format!("/projects/{}", project.id)).await;
    anonymous.assert_status_ok();
    assert_eq!(anonymous.json::<Value>()["data"]["bookmarked"], false);

    server
        .delete(&format!("/bookmarks/{}", project.id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/bookmarks/{}", project.id))
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookmark_unknown_project() {
    let state = test_state().await;
    let server = test_server(&state);
    let (_, token) = seed_user(&state, "ada@example.com", "Ada Lovelace").await;

    let response = server
        .post("/bookmarks")
        .add_header(AUTHORIZATION, bearer_auth(&token))
        .json(&json!({ "projectId": "missing" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
