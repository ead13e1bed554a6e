//! Application configuration record and its JSON-backed store.
//!
//! The configuration is a single record persisted as `config.json` under the
//! per-user application directory. There is exactly one live instance per
//! process; `save` replaces the whole record atomically rather than patching
//! individual fields.

pub mod paths;

use crate::error::ApiError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where request and configuration data is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageBackend {
    Local,
    Rdbms,
    VersionControlled,
    Mock,
}

/// How the crate authenticates against Unity Catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMode {
    /// No remote calls; catalog and identity data come from the mock provider.
    Mock,
    /// Single-workspace deployment authenticated at the workspace host.
    Workspace,
    /// Account-level deployment authenticated at the accounts host.
    Account,
}

/// Identity-provider flavor configured for end-user SSO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdpKind {
    Saml,
    Oidc,
}

/// Secret-vault flavor holding the M2M client secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaultKind {
    Local,
    Hashicorp,
    AzureKeyVault,
}

/// The persisted configuration record.
///
/// JSON keys mirror the wire contract (`type`, `ucClientId`, ...), so files
/// written by earlier deployments of the admin tool load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(rename = "type")]
    pub backend: StorageBackend,
    pub path: String,
    #[serde(rename = "ucAuthType")]
    pub auth_mode: AuthMode,
    #[serde(rename = "ucClientId")]
    pub client_id: String,
    #[serde(rename = "ucClientSecret")]
    pub client_secret: String,
    #[serde(rename = "ucHost")]
    pub host: String,
    #[serde(rename = "ucAccountId")]
    pub account_id: String,
    #[serde(rename = "idpType")]
    pub idp_kind: IdpKind,
    #[serde(rename = "vaultType")]
    pub vault_kind: VaultKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            path: String::new(),
            auth_mode: AuthMode::Mock,
            client_id: String::new(),
            client_secret: String::new(),
            host: String::new(),
            account_id: String::new(),
            idp_kind: IdpKind::Saml,
            vault_kind: VaultKind::Local,
        }
    }
}

/// Store owning the singleton [`AppConfig`] and its file representation.
///
/// Reads recover to defaults when the file is absent or corrupt (the
/// on-corrupt-use-default policy); writes surface failures as
/// [`ApiError::PersistenceError`]. Single-writer per process is assumed; the
/// in-memory record itself is safe to share across sessions.
pub struct ConfigStore {
    dir: PathBuf,
    current: RwLock<Option<AppConfig>>,
}

impl ConfigStore {
    /// Create a store rooted at the default per-user data directory.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_dir(paths::data_dir()?))
    }

    /// Create a store rooted at a specific directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            current: RwLock::new(None),
        }
    }

    /// Path of the persisted configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    /// Load the configuration, reading the file on first call.
    ///
    /// A missing or unreadable file yields the default record; corruption is
    /// logged, never surfaced.
    pub fn load(&self) -> Result<AppConfig, ApiError> {
        if let Some(config) = self.current.read().as_ref() {
            return Ok(config.clone());
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::PersistenceError(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.config_path();
        let config = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<AppConfig>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        "Corrupt configuration at {}: {}; falling back to defaults",
                        path.display(),
                        e
                    );
                    self.default_config()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => self.default_config(),
            Err(e) => {
                tracing::warn!(
                    "Unreadable configuration at {}: {}; falling back to defaults",
                    path.display(),
                    e
                );
                self.default_config()
            }
        };

        *self.current.write() = Some(config.clone());
        Ok(config)
    }

    /// Persist a new configuration record and replace the live instance.
    pub fn save(&self, config: &AppConfig) -> Result<(), ApiError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::PersistenceError(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.config_path();
        let json = serde_json::to_string_pretty(config).map_err(|e| {
            ApiError::PersistenceError(format!("Failed to serialize configuration: {}", e))
        })?;
        std::fs::write(&path, json).map_err(|e| {
            ApiError::PersistenceError(format!(
                "Failed to write configuration to {}: {}",
                path.display(),
                e
            ))
        })?;

        *self.current.write() = Some(config.clone());
        Ok(())
    }

    fn default_config(&self) -> AppConfig {
        AppConfig {
            path: self.dir.to_string_lossy().into_owned(),
            ..AppConfig::default()
        }
    }
}
