//! Configuration management for Showcase.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present) covering the HTTP server, database, JWT auth, S3 uploads and
//! upload rate limiting.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origin. Credentials mode needs an explicit origin.
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite path or URL. Required; startup fails without it.
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
    /// Client id of the Google sign-in app that issues identities
    pub google_client_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Public CDN domain fronting the bucket
    pub cloudfront_domain: Option<String>,
    pub upload_url_ttl_seconds: u64,
    pub max_upload_size: u64,
    pub allowed_content_types: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Upload URLs a single user may request per minute
    pub uploads_per_minute: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8080").parse().unwrap_or(8080),
                cors_origin: env::var("CORS_ORIGIN").ok(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                    tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
                    nanoid::nanoid!(48)
                }),
                token_ttl_seconds: env_or("JWT_TTL_SECONDS", "604800")
                    .parse()
                    .unwrap_or(604800), // 7 days
                cookie_secure: parse_bool(&env_or("SESSION_COOKIE_SECURE", "true")),
                google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            },
            storage: StorageConfig {
                bucket: env_or("S3_BUCKET", "showcase-uploads"),
                region: env_or("S3_REGION", "us-east-1"),
                cloudfront_domain: env::var("CLOUDFRONT_DOMAIN").ok(),
                upload_url_ttl_seconds: env_or("UPLOAD_URL_TTL_SECONDS", "300")
                    .parse()
                    .unwrap_or(300),
                max_upload_size: env_or("MAX_UPLOAD_SIZE", "10485760")
                    .parse()
                    .unwrap_or(10 * 1024 * 1024), // 10MB
                allowed_content_types: parse_list(&env_or(
                    "ALLOWED_UPLOAD_TYPES",
                    "image/jpeg,image/png,image/webp,image/gif",
                )),
            },
            rate_limit: RateLimitConfig {
                uploads_per_minute: env_or("UPLOAD_RATE_PER_MINUTE", "10")
                    .parse()
                    .unwrap_or(10),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

/// Comma-separated list, lowercased, blanks dropped.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
