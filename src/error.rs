//! Error taxonomy for the access-request core.
//!
//! One `ApiError` enum crosses every component boundary; the presentation
//! layer renders `Display` output directly, so messages must stand on their
//! own without access to the originating call site.

use crate::requests::RequestStatus;
use thiserror::Error;

/// Errors surfaced to callers of the access-request core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required setting is missing or unusable (e.g. workspace host).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// M2M client id or secret is blank.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// The token endpoint answered with a non-success status.
    #[error("Auth service returned HTTP {status}: {body}")]
    AuthServiceError { status: u16, body: String },

    /// Network or response-parse failure while talking to the catalog.
    #[error("Sync error: {0}")]
    SyncError(String),

    /// Caller input rejected before any side effect.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A store could not be written. Reads recover to defaults instead.
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Attempted status flip on a request already in a terminal state.
    #[error("Request {id} is already {from:?} and cannot change state")]
    InvalidTransition { id: String, from: RequestStatus },
}
