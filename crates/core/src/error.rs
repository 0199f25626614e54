//! Error types for Docket
//!
//! Every fallible operation in the engine, the job queue and the storage
//! adapters returns [`DocketError`]. We use `thiserror` for automatic
//! `Display` and `Error` trait implementations.
//!
//! ## Taxonomy
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `NotFound` | id absent on get/update/remove/dequeue |
//! | `InvalidCursor` | cursor inconsistent with the current query shape |
//! | `InvalidTransition` | illegal job status change |
//! | `Configuration` | slot collisions, non-indexed filter keys, `take` over the ceiling |
//! | `InvalidInput` | payload is not an object, schema parse hook rejected it |
//! | `AlreadyExists` | adapter asked to insert an id it already holds |
//! | `Storage` | the backing store failed |
//! | `Serialization` | encoding or decoding a record failed |

use crate::job::JobStatus;
use thiserror::Error;

/// Result type alias for Docket operations
pub type DocketResult<T> = std::result::Result<T, DocketError>;

/// Error types for the document store and job queue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocketError {
    /// Referenced document does not exist
    #[error("document not found: {id}")]
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// Pagination cursor does not match the query it is replayed against
    #[error("invalid cursor: {reason}")]
    InvalidCursor {
        /// Why the cursor was rejected
        reason: String,
    },

    /// Job status change not permitted by the state machine
    #[error("invalid transition for job {id}: {from} -> {to}")]
    InvalidTransition {
        /// Job id
        id: String,
        /// Status the job currently has
        from: JobStatus,
        /// Status that was requested
        to: JobStatus,
    },

    /// Schema or query configuration is not supported
    #[error("configuration error: {reason}")]
    Configuration {
        /// Description of the problem
        reason: String,
    },

    /// Caller supplied a value the engine cannot accept
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem
        reason: String,
    },

    /// Storage adapter already holds a record with this id
    #[error("document already exists: {id}")]
    AlreadyExists {
        /// The duplicate id
        id: String,
    },

    /// Backing store failure
    #[error("storage error: {reason}")]
    Storage {
        /// Adapter-provided detail
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {reason}")]
    Serialization {
        /// Codec-provided detail
        reason: String,
    },
}

impl DocketError {
    /// Document `id` was not found
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        DocketError::NotFound { id: id.to_string() }
    }

    /// Cursor rejected
    pub fn invalid_cursor(reason: impl Into<String>) -> Self {
        DocketError::InvalidCursor {
            reason: reason.into(),
        }
    }

    /// Configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        DocketError::Configuration {
            reason: reason.into(),
        }
    }

    /// Invalid caller input
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        DocketError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Backing store failure
    pub fn storage(reason: impl Into<String>) -> Self {
        DocketError::Storage {
            reason: reason.into(),
        }
    }

    /// Codec failure
    pub fn serialization(reason: impl Into<String>) -> Self {
        DocketError::Serialization {
            reason: reason.into(),
        }
    }

    /// True for [`DocketError::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocketError::NotFound { .. })
    }

    /// True for [`DocketError::InvalidCursor`]
    pub fn is_invalid_cursor(&self) -> bool {
        matches!(self, DocketError::InvalidCursor { .. })
    }

    /// True for [`DocketError::InvalidTransition`]
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, DocketError::InvalidTransition { .. })
    }

    /// True for [`DocketError::Configuration`]
    pub fn is_configuration(&self) -> bool {
        matches!(self, DocketError::Configuration { .. })
    }
}

impl From<serde_json::Error> for DocketError {
    fn from(e: serde_json::Error) -> Self {
        DocketError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = DocketError::not_found("OID-ABCD-1234");
        let msg = err.to_string();
        assert!(msg.contains("document not found"));
        assert!(msg.contains("OID-ABCD-1234"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_display_invalid_transition() {
        let err = DocketError::InvalidTransition {
            id: "job-1".to_string(),
            from: JobStatus::Processed,
            to: JobStatus::Active,
        };
        let msg = err.to_string();
        assert!(msg.contains("processed -> active"));
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_error_display_configuration() {
        let err = DocketError::configuration("take 5000 exceeds ceiling 1000");
        assert!(err.to_string().contains("configuration error"));
        assert!(err.is_configuration());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_from_serde_json() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: DocketError = parsed.unwrap_err().into();
        assert!(matches!(err, DocketError::Serialization { .. }));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = DocketError::invalid_cursor("order mismatch");
        match err {
            DocketError::InvalidCursor { reason } => assert_eq!(reason, "order mismatch"),
            _ => panic!("Wrong error variant"),
        }
    }
}
