//! M2M bearer-token acquisition and caching.
//!
//! Tokens are fetched with the OAuth2 client-credentials grant and cached
//! per `(client_id, host)` pair for the life of the process. The cache has
//! no TTL; invalidation happens through [`TokenCache::clear`], which the
//! config-save path calls whenever credentials may have changed.

pub mod transport;

pub use transport::{HttpTransport, RawResponse, ReqwestTransport};

use crate::config::AppConfig;
use crate::error::ApiError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Accounts endpoint used when no host is configured.
pub const DEFAULT_ACCOUNTS_HOST: &str = "accounts.cloud.databricks.com";

/// OAuth scope requested for every token.
const TOKEN_SCOPE: &str = "all-apis";

/// Prefix a bare hostname with `https://`; already-schemed values pass through.
pub fn ensure_https_scheme(host: &str) -> String {
    if host.starts_with("http") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Process-wide cache of M2M bearer tokens.
///
/// Safe for concurrent sessions; the map is the only shared mutable state in
/// the auth path.
pub struct TokenCache {
    transport: Arc<dyn HttpTransport>,
    tokens: RwLock<HashMap<(String, String), String>>,
}

impl TokenCache {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Return a bearer token for the configured credentials, fetching on miss.
    ///
    /// Fails with [`ApiError::CredentialError`] when client id or secret is
    /// blank, and with [`ApiError::AuthServiceError`] when the token endpoint
    /// answers non-200 (nothing is cached in that case).
    pub async fn get_token(&self, config: &AppConfig) -> Result<String, ApiError> {
        let client_id = config.client_id.trim();
        let client_secret = config.client_secret.trim();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ApiError::CredentialError(
                "M2M credentials (client id/secret) are missing in settings".to_string(),
            ));
        }

        let host = match config.host.trim() {
            "" => DEFAULT_ACCOUNTS_HOST,
            configured => configured,
        };
        let key = (client_id.to_string(), host.to_string());

        if let Some(token) = self.tokens.read().get(&key) {
            return Ok(token.clone());
        }

        let token_url = format!("{}/oidc/v1/token", ensure_https_scheme(host));
        let form = vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), client_id.to_string()),
            ("client_secret".to_string(), client_secret.to_string()),
            ("scope".to_string(), TOKEN_SCOPE.to_string()),
        ];

        let response = self.transport.post_form(&token_url, &form).await?;
        if response.status != 200 {
            tracing::error!(status = response.status, "M2M token exchange rejected");
            return Err(ApiError::AuthServiceError {
                status: response.status,
                body: response.body,
            });
        }

        let body: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::SyncError(format!("Unreadable token response: {}", e)))?;
        let token = body
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ApiError::SyncError("Token response did not contain access_token".to_string())
            })?
            .to_string();

        self.tokens.write().insert(key, token.clone());
        Ok(token)
    }

    /// Drop every cached token. Must be called when credentials change.
    pub fn clear(&self) {
        self.tokens.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedTransport {
        status: u16,
        body: String,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn ok(body: &str) -> Self {
            Self {
                status: 200,
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn post_form(
            &self,
            _url: &str,
            _form: &[(String, String)],
        ) -> Result<RawResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }

        async fn get_bearer(&self, _url: &str, _token: &str) -> Result<RawResponse, ApiError> {
            unreachable!("token cache never issues GET requests")
        }
    }

    fn config_with(client_id: &str, secret: &str, host: &str) -> AppConfig {
        AppConfig {
            client_id: client_id.to_string(),
            client_secret: secret.to_string(),
            host: host.to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_token_fetched_once_per_credential_pair() {
        let transport = Arc::new(ScriptedTransport::ok(r#"{"access_token":"tok-1"}"#));
        let cache = TokenCache::new(transport.clone());
        let config = config_with("svc", "secret", "adb-1.azuredatabricks.net");

        for _ in 0..3 {
            let token = cache.get_token(&config).await.unwrap();
            assert_eq!(token, "tok-1");
        }
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_hosts_get_distinct_cache_entries() {
        let transport = Arc::new(ScriptedTransport::ok(r#"{"access_token":"tok"}"#));
        let cache = TokenCache::new(transport.clone());

        cache
            .get_token(&config_with("svc", "secret", "host-a"))
            .await
            .unwrap();
        cache
            .get_token(&config_with("svc", "secret", "host-b"))
            .await
            .unwrap();
        cache
            .get_token(&config_with("svc", "secret", "host-a"))
            .await
            .unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let transport = Arc::new(ScriptedTransport::ok(r#"{"access_token":"tok"}"#));
        let cache = TokenCache::new(transport.clone());
        let config = config_with("svc", "secret", "host");

        cache.get_token(&config).await.unwrap();
        cache.clear();
        cache.get_token(&config).await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected_without_network() {
        let transport = Arc::new(ScriptedTransport::ok(r#"{"access_token":"tok"}"#));
        let cache = TokenCache::new(transport.clone());

        for (id, secret) in [("", "secret"), ("svc", ""), ("", ""), ("  ", "secret")] {
            let result = cache.get_token(&config_with(id, secret, "host")).await;
            assert!(matches!(result, Err(ApiError::CredentialError(_))));
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_200_surfaces_status_and_body_uncached() {
        let transport = Arc::new(ScriptedTransport::failing(
            401,
            r#"{"error":"invalid_client"}"#,
        ));
        let cache = TokenCache::new(transport.clone());
        let config = config_with("svc", "wrong", "host");

        for _ in 0..2 {
            match cache.get_token(&config).await {
                Err(ApiError::AuthServiceError { status, body }) => {
                    assert_eq!(status, 401);
                    assert!(body.contains("invalid_client"));
                }
                other => panic!("expected AuthServiceError, got {:?}", other),
            }
        }
        // Failures are never cached, so both attempts hit the transport.
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_access_token_field_is_sync_error() {
        let transport = Arc::new(ScriptedTransport::ok(r#"{"token_type":"Bearer"}"#));
        let cache = TokenCache::new(transport);
        let result = cache
            .get_token(&config_with("svc", "secret", "host"))
            .await;
        assert!(matches!(result, Err(ApiError::SyncError(_))));
    }

    #[test]
    fn test_scheme_normalization() {
        assert_eq!(ensure_https_scheme("example.com"), "https://example.com");
        assert_eq!(ensure_https_scheme("https://example.com"), "https://example.com");
        assert_eq!(ensure_https_scheme("http://example.com"), "http://example.com");
    }
}
