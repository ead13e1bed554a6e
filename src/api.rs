//! Facade consumed by the presentation layer.
//!
//! One `AccessApi` per process wires the stores, token cache, catalog client
//! and workflow together. Methods return typed [`ApiError`] values for
//! display; the facade never formats user-facing text beyond `Display` on
//! the error itself.

use crate::auth::{HttpTransport, ReqwestTransport, TokenCache};
use crate::catalog::{mock, CatalogClient, CatalogNode, Identity, WorkspaceEntry};
use crate::config::{paths, AppConfig, AuthMode, ConfigStore};
use crate::error::ApiError;
use crate::requests::{AccessRequest, AccessWorkflow, RequestStore};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Composition root for the access-request core.
pub struct AccessApi {
    config: ConfigStore,
    tokens: Arc<TokenCache>,
    catalog: CatalogClient,
    workflow: AccessWorkflow,
}

impl AccessApi {
    /// Production wiring: reqwest transport, default per-user data directory.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_transport_and_dir(
            Arc::new(ReqwestTransport::new()?),
            paths::data_dir()?,
        ))
    }

    /// Wiring with an explicit transport and data directory.
    pub fn with_transport_and_dir(transport: Arc<dyn HttpTransport>, dir: PathBuf) -> Self {
        let tokens = Arc::new(TokenCache::new(transport.clone()));
        Self {
            config: ConfigStore::with_dir(dir.clone()),
            catalog: CatalogClient::new(tokens.clone(), transport),
            workflow: AccessWorkflow::new(RequestStore::with_dir(dir)),
            tokens,
        }
    }

    /// The live configuration record.
    pub fn load_config(&self) -> Result<AppConfig, ApiError> {
        self.config.load()
    }

    /// Persist a new configuration record.
    ///
    /// Credentials may have changed, so every cached token is dropped; the
    /// next catalog sync re-authenticates.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ApiError> {
        self.config.save(config)?;
        self.tokens.clear();
        Ok(())
    }

    /// Re-fetch the catalog tree under the current configuration.
    pub async fn refresh(&self) -> Result<Vec<CatalogNode>, ApiError> {
        let config = self.config.load()?;
        self.catalog.fetch_catalogs(&config).await
    }

    /// Workspaces reachable under the current configuration.
    pub fn fetch_workspaces(&self) -> Result<Vec<WorkspaceEntry>, ApiError> {
        let config = self.config.load()?;
        self.catalog.fetch_workspaces(&config)
    }

    /// Identities available for request attribution.
    pub fn identities(&self) -> Result<Vec<Identity>, ApiError> {
        let config = self.config.load()?;
        match config.auth_mode {
            AuthMode::Mock => Ok(mock::identities()),
            _ => Ok(Vec::new()),
        }
    }

    /// File one request per selected node. See [`AccessWorkflow::submit`].
    pub fn submit(
        &self,
        nodes: &[CatalogNode],
        permissions: &BTreeSet<String>,
        justification: &str,
        requester: &Identity,
    ) -> Result<Vec<AccessRequest>, ApiError> {
        self.workflow.submit(nodes, permissions, justification, requester)
    }

    /// Approve a pending request.
    pub fn approve(&self, request_id: &str) -> Result<AccessRequest, ApiError> {
        self.workflow.approve(request_id)
    }

    /// Reject a pending request.
    pub fn reject(&self, request_id: &str) -> Result<AccessRequest, ApiError> {
        self.workflow.reject(request_id)
    }

    /// All requests, newest-first.
    pub fn list_requests(&self) -> Vec<AccessRequest> {
        self.workflow.list()
    }

    /// Requests still awaiting review.
    pub fn pending_count(&self) -> usize {
        self.workflow.pending_count()
    }
}
