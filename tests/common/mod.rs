//! Common test utilities and helpers.

use std::sync::Arc;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::Client as S3Client;
use axum::http::HeaderValue;
use axum_test::TestServer;
use showcase::api;
use showcase::config::{AuthConfig, RateLimitConfig, StorageConfig};
use showcase::db::{self, CreateUser, DbPool, PoolConfig};
use showcase::services::{AuthService, StorageService, UploadLimiter};
use showcase::AppState;
use showcase_models::User;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const UPLOADS_PER_MINUTE: u32 = 3;
pub const GOOGLE_CLIENT_ID: &str = "showcase-test.apps.googleusercontent.com";
pub const CORS_ORIGIN: &str = "https://showcase.example";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_seconds: 3600,
        cookie_secure: false,
        google_client_id: None,
    }
}

fn storage_config() -> StorageConfig {
    StorageConfig {
        bucket: "showcase-test".to_string(),
        region: "us-east-1".to_string(),
        cloudfront_domain: Some("cdn.example.com".to_string()),
        upload_url_ttl_seconds: 300,
        max_upload_size: 1024 * 1024,
        allowed_content_types: vec!["image/*".to_string()],
    }
}

/// S3 client with static credentials. Presigning never touches the network.
fn s3_client() -> S3Client {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .build();
    S3Client::from_conf(config)
}

/// Create a test database with the schema applied
pub async fn setup_test_db() -> DbPool {
    let pool = db::create_pool_with_config(":memory:", PoolConfig::test())
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    pool
}

pub async fn test_state() -> AppState {
    AppState {
        db: setup_test_db().await,
        auth: AuthService::new(&auth_config()),
        storage: Arc::new(StorageService::with_client(s3_client(), storage_config())),
        upload_limiter: Arc::new(UploadLimiter::new(&RateLimitConfig {
            uploads_per_minute: UPLOADS_PER_MINUTE,
        })),
        cookie_secure: false,
        google_client_id: Some(GOOGLE_CLIENT_ID.to_string()),
    }
}

pub fn test_server(state: &AppState) -> TestServer {
    let app = api::routes(state.clone()).with_state(state.clone());
    TestServer::new(app).expect("Failed to create test server")
}

/// The served application, middleware stack included
pub fn full_app_server(state: &AppState) -> TestServer {
    let app = api::app(state.clone(), Some(CORS_ORIGIN)).expect("Failed to build app");
    TestServer::new(app).expect("Failed to create test server")
}

/// Insert a user and return it with a valid bearer token
pub async fn seed_user(state: &AppState, email: &str, name: &str) -> (User, String) {
    let user = db::create_user(
        &state.db,
        CreateUser {
            email: email.to_string(),
            full_name: name.to_string(),
            avatar_url: None,
        },
    )
    .await
    .expect("Failed to create user");

    let token = state.auth.issue_token(&user).expect("Failed to issue token");
    (user, token)
}

/// Helper function to create a Bearer Authorization header value
pub fn bearer_auth(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}
