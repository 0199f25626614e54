//! Error types for the executor.
//!
//! The [`Error`] enum is the wire form of every failure a [`Command`](crate::Command)
//! can produce. It is serializable so SDKs and remote callers receive the same
//! structured information the Rust API returns.
//!
//! # Error Categories
//!
//! | Category | Variants | Caller action |
//! |----------|----------|---------------|
//! | Not found | `DocumentNotFound` | Check the id |
//! | Query | `InvalidCursor`, `Configuration` | Fix the query or restart pagination |
//! | Jobs | `InvalidTransition` | Re-read the job status |
//! | Input | `InvalidInput`, `AlreadyExists` | Fix the request |
//! | System | `Storage`, `Serialization` | Report or retry at a higher level |

use docket_core::JobStatus;
use serde::{Deserialize, Serialize};

/// Executor errors.
///
/// Every variant carries enough detail to be shown to a user without
/// access to the engine's internal error type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// No document with this id
    #[error("document not found: {id}")]
    DocumentNotFound { id: String },

    // ==================== Query ====================
    /// Cursor does not belong to this query
    #[error("invalid cursor: {reason}")]
    InvalidCursor { reason: String },

    /// Unsupported key, operator, ordering or page size
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    // ==================== Jobs ====================
    /// Job status change not allowed
    #[error("invalid transition for job {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: JobStatus,
        to: JobStatus,
    },

    // ==================== Input ====================
    /// Request payload rejected
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Id already taken
    #[error("document already exists: {id}")]
    AlreadyExists { id: String },

    // ==================== System ====================
    /// Backing store failure
    #[error("storage error: {reason}")]
    Storage { reason: String },

    /// Encoding or decoding failure
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl Error {
    /// Short machine-readable name of the variant
    pub fn code(&self) -> &'static str {
        match self {
            Error::DocumentNotFound { .. } => "NotFound",
            Error::InvalidCursor { .. } => "InvalidCursor",
            Error::Configuration { .. } => "Configuration",
            Error::InvalidTransition { .. } => "InvalidTransition",
            Error::InvalidInput { .. } => "InvalidInput",
            Error::AlreadyExists { .. } => "AlreadyExists",
            Error::Storage { .. } => "Storage",
            Error::Serialization { .. } => "Serialization",
        }
    }
}
