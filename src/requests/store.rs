//! JSON file persistence for the request collection.

use super::AccessRequest;
use crate::config::paths;
use crate::error::ApiError;
use std::path::PathBuf;

/// Store reading and writing the request collection wholesale.
///
/// There is no incremental append; callers read-modify-write the full
/// collection. In-process serialization is the workflow's job; concurrent
/// writers from other processes remain last-writer-wins.
pub struct RequestStore {
    dir: PathBuf,
}

impl RequestStore {
    /// Create a store rooted at the default per-user data directory.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_dir(paths::data_dir()?))
    }

    /// Create a store rooted at a specific directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the persisted request file.
    pub fn requests_path(&self) -> PathBuf {
        self.dir.join("requests.json")
    }

    /// Read the full collection; absent or unreadable files yield empty.
    pub fn fetch_all(&self) -> Vec<AccessRequest> {
        let path = self.requests_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    "Unreadable request file {}: {}; treating as empty",
                    path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(requests) => requests,
            Err(e) => {
                tracing::warn!(
                    "Corrupt request file {}: {}; treating as empty",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted collection.
    pub fn save_all(&self, requests: &[AccessRequest]) -> Result<(), ApiError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::PersistenceError(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.requests_path();
        let json = serde_json::to_string_pretty(requests).map_err(|e| {
            ApiError::PersistenceError(format!("Failed to serialize requests: {}", e))
        })?;
        std::fs::write(&path, json).map_err(|e| {
            ApiError::PersistenceError(format!(
                "Failed to write requests to {}: {}",
                path.display(),
                e
            ))
        })
    }
}
