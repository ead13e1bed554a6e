//! HTTP transport port for the Unity Catalog integration.
//!
//! Callers branch on raw status codes (token exchange treats non-200 as a
//! typed failure, catalog listing degrades to empty), so the port hands back
//! status and body verbatim instead of pre-judging success.

use crate::error::ApiError;
use async_trait::async_trait;
use std::time::Duration;

/// Undecoded HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound HTTP operations the core needs.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST an urlencoded form.
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, ApiError>;

    /// GET with a bearer token.
    async fn get_bearer(&self, url: &str, token: &str) -> Result<RawResponse, ApiError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl ReqwestTransport {
    /// Build the transport with the default per-call timeout.
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::SyncError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, ApiError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| ApiError::SyncError(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::SyncError(format!("Unreadable response from {}: {}", url, e)))?;
        Ok(RawResponse { status, body })
    }

    async fn get_bearer(&self, url: &str, token: &str) -> Result<RawResponse, ApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::SyncError(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::SyncError(format!("Unreadable response from {}: {}", url, e)))?;
        Ok(RawResponse { status, body })
    }
}
