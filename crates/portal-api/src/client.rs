//! JSON HTTP client with bearer-token injection.

use crate::{ApiError, ApiResult, TokenProviderBridge};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// HTTP client for the portal API.
///
/// Owns the versioned base URL and the token provider bridge; every request
/// asks the bridge for the current access token and attaches it as an
/// `Authorization: Bearer` header when present.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenProviderBridge>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Full API URL including the version prefix
    ///   (e.g. `https://portal.example.com/api/v1`)
    /// * `tokens` - Bridge queried per request for the current access token
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenProviderBridge>) -> Self {
        let base_url = base_url.into();
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Build the full URL for an API path.
    fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Attach the current access token, when the bridge yields one.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.current_token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Send a GET request and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint_url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.authorize(self.http_client.get(&url)).send().await?;
        Self::decode(response).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .authorize(self.http_client.post(&url))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Send a POST request whose response body is ignored.
    pub async fn post_and_ignore<B>(&self, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path);
        tracing::debug!(url = %url, "POST (response ignored)");

        let response = self
            .authorize(self.http_client.post(&url))
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Send a DELETE request whose response body is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.endpoint_url(path);
        tracing::debug!(url = %url, "DELETE");

        let response = self.authorize(self.http_client.delete(&url)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Map a non-2xx response to `ApiError::Status`, passing 2xx through.
    async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = Self::server_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        tracing::warn!(status = %status, message = %message, "Request failed");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a JSON response, mapping failures to `ApiError`.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Extract the `detail` field from a JSON error body.
    fn server_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("detail")?.as_str().map(str::to_string)
    }
}
