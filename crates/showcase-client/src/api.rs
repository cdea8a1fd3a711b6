//! The HTTP client every service call goes through.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use showcase_models::ApiResponse;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

static GLOBAL: OnceCell<ApiClient> = OnceCell::new();

/// A decoded 2xx response.
#[derive(Debug, Clone)]
pub struct HttpResponse<T> {
    pub status: StatusCode,
    pub data: T,
}

impl<T> HttpResponse<ApiResponse<T>> {
    /// The envelope, provided the status is 2xx and the envelope is a success.
    pub fn into_envelope(self, action: &str) -> Result<ApiResponse<T>> {
        if self.status.is_success() && self.data.is_success() {
            Ok(self.data)
        } else {
            Err(failure(action, &self.data.message))
        }
    }

    /// The payload of a successful envelope.
    pub fn into_payload(self, action: &str) -> Result<T> {
        self.into_envelope(action)?
            .data
            .ok_or_else(|| failure(action, ""))
    }
}

pub(crate) fn failure(action: &str, message: &str) -> ClientError {
    if message.is_empty() {
        ClientError::Failed(format!("Failed to {}", action))
    } else {
        ClientError::Failed(format!("Failed to {}: {}", action, message))
    }
}

/// JSON API client with a cookie store and an optional bearer token.
///
/// Cheap to clone; clones share the connection pool, the cookie jar and the
/// token. Request paths are given as segments, each percent-encoded on its
/// own, so ids never change the route.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    raw: Client,
    base: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            raw: Client::new(),
            base: config.base_url()?,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// The process-wide client, built from the environment on first use.
    pub fn global() -> Result<&'static ApiClient> {
        GLOBAL.get_or_try_init(|| ApiClient::new(&ClientConfig::from_env()?))
    }

    /// Send `Authorization: Bearer` on every following request.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Stop sending `Authorization`, e.g. after logout.
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<HttpResponse<T>> {
        self.send(self.http.get(self.url(path)?)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &[&str], query: &Q) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.http.get(self.url(path)?).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &[&str], body: &B) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.http.post(self.url(path)?).json(body)).await
    }

    pub async fn put<T, B>(&self, path: &[&str], body: &B) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.http.put(self.url(path)?).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &[&str]) -> Result<HttpResponse<T>> {
        self.send(self.http.delete(self.url(path)?)).await
    }

    /// PUT raw bytes to an absolute URL, such as a pre-signed upload target.
    ///
    /// Sent without the API's cookies, token or JSON headers.
    pub async fn put_bytes(
        &self,
        url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StatusCode> {
        let response = self
            .raw
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.status())
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("API URL cannot take a path: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<HttpResponse<T>> {
        let request = match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        debug!(url = %response.url(), status = %response.status(), "API response");

        let response = response.error_for_status()?;
        let status = response.status();
        let data = response.json::<T>().await?;

        Ok(HttpResponse { status, data })
    }
}
