//! Catalog fetch against the Unity Catalog REST surface.

use super::{mock, CatalogNode, ObjectKind, WorkspaceEntry};
use crate::auth::{ensure_https_scheme, HttpTransport, TokenCache};
use crate::config::{AppConfig, AuthMode};
use crate::error::ApiError;
use std::sync::Arc;

/// Client mapping remote catalog listings into [`CatalogNode`] trees.
///
/// In MOCK auth mode every call is answered locally. Otherwise the client
/// needs a configured host; credential and auth failures from the token
/// exchange propagate unchanged, while a non-200 catalog listing degrades to
/// an empty tree (an empty result is therefore ambiguous by design — it can
/// mean "no catalogs" or "listing refused").
pub struct CatalogClient {
    tokens: Arc<TokenCache>,
    transport: Arc<dyn HttpTransport>,
}

impl CatalogClient {
    pub fn new(tokens: Arc<TokenCache>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { tokens, transport }
    }

    /// Fetch the top-level catalog list, rebuilt wholesale on every call.
    pub async fn fetch_catalogs(&self, config: &AppConfig) -> Result<Vec<CatalogNode>, ApiError> {
        if config.auth_mode == AuthMode::Mock {
            return Ok(mock::catalogs());
        }

        let host = config.host.trim();
        if host.is_empty() {
            return Err(ApiError::ConfigError(
                "Workspace URL (UC host) is not configured".to_string(),
            ));
        }
        let workspace_url = ensure_https_scheme(host);

        let token = self.tokens.get_token(config).await?;
        let url = format!("{}/api/2.1/unity-catalog/catalogs", workspace_url);
        let response = self.transport.get_bearer(&url, &token).await?;

        if response.status != 200 {
            tracing::warn!(
                status = response.status,
                "Catalog listing refused; returning empty catalog set"
            );
            return Ok(Vec::new());
        }

        let body: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::SyncError(format!("Unreadable catalog listing: {}", e)))?;

        let mut nodes = Vec::new();
        if let Some(catalogs) = body.get("catalogs").and_then(|c| c.as_array()) {
            for entry in catalogs {
                if let Some(name) = entry.get("name").and_then(|n| n.as_str()) {
                    nodes.push(CatalogNode::new(name, name, ObjectKind::Catalog));
                }
            }
        }
        Ok(nodes)
    }

    /// List workspaces reachable under the current configuration.
    ///
    /// WORKSPACE deployments have exactly one, derived from the configured
    /// host; no network call is made.
    pub fn fetch_workspaces(&self, config: &AppConfig) -> Result<Vec<WorkspaceEntry>, ApiError> {
        match config.auth_mode {
            AuthMode::Mock => Ok(mock::workspaces()),
            AuthMode::Workspace => {
                let host = config.host.trim();
                if host.is_empty() {
                    return Err(ApiError::ConfigError(
                        "Workspace URL (UC host) is not configured".to_string(),
                    ));
                }
                Ok(vec![WorkspaceEntry {
                    id: "ws_single".to_string(),
                    name: derive_workspace_name(host),
                    url: ensure_https_scheme(host),
                }])
            }
            AuthMode::Account => {
                tracing::debug!("Account-level workspace listing is not wired up");
                Ok(Vec::new())
            }
        }
    }
}

/// Human-readable workspace name from the host's first DNS label.
fn derive_workspace_name(host: &str) -> String {
    let bare = host
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let label = bare.split('.').next().unwrap_or("workspace");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Workspace".to_string(),
    }
}
