//! Core types and traits for Docket
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId: opaque unique identifier for stored records
//! - Document: canonical record with payload, index slots and metadata
//! - SlotKey / Slots: the four generic index slots plus the text field
//! - Job / JobStatus: the job specialization and its state machine
//! - Timestamp: microsecond timestamps with RFC 3339 text form
//! - DocketError: error type hierarchy
//! - StorageAdapter: the narrow interface required from a backing store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod document;
pub mod error;
pub mod job;
pub mod traits;
pub mod types;

pub use contract::Timestamp;
pub use document::{payload_from_value, Document, Payload, METADATA_KEYS};
pub use error::{DocketError, DocketResult};
pub use job::{Job, JobStatus};
pub use traits::{DocumentScan, IndexHint, StorageAdapter};
pub use types::{DocumentId, SlotKey, Slots};
