//! Client configuration.

use reqwest::Url;

use crate::error::{ClientError, Result};

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub api_url: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must be http(s): {:?}",
                api_url
            )));
        }

        Ok(Self { api_url })
    }

    /// The parsed base URL that request paths are appended to.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api_url)
            .map_err(|e| ClientError::Config(format!("Invalid API URL {:?}: {}", self.api_url, e)))
    }

    /// Read `SHOWCASE_API_URL`, falling back to a local server.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("SHOWCASE_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::new(api_url)
    }
}
