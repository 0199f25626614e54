//! Job: a document specialization with a status state machine
//!
//! Jobs live in the same store as every other document. The job fields are
//! layered onto the generic record shape:
//!
//! | Job field | Document field |
//! |-----------|----------------|
//! | `status` | `sk1` |
//! | `name` | `sk2` |
//! | `runAfter` | `sk3` (fixed-width RFC 3339 text) |
//! | `context` | `data` |
//!
//! so that "queued and eligible" is an ordinary slot query.
//!
//! ## State machine
//!
//! ```text
//! queued ──► active ──► processed
//!    │          │
//!    └──────────┴─────► failed
//! ```
//!
//! `processed` and `failed` are terminal.

use crate::contract::timestamp::{self, Timestamp};
use crate::document::{Document, Payload};
use crate::error::{DocketError, DocketResult};
use crate::types::{DocumentId, SlotKey, Slots};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot holding the job status
pub const STATUS_SLOT: SlotKey = SlotKey::Sk1;
/// Slot holding the handler name
pub const NAME_SLOT: SlotKey = SlotKey::Sk2;
/// Slot holding the `runAfter` timestamp text
pub const RUN_AFTER_SLOT: SlotKey = SlotKey::Sk3;

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Waiting to be picked up
    Queued,
    /// Handed to a worker
    Active,
    /// Completed successfully (terminal)
    Processed,
    /// Gave up (terminal)
    Failed,
}

impl JobStatus {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Active => "active",
            JobStatus::Processed => "processed",
            JobStatus::Failed => "failed",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Processed | JobStatus::Failed)
    }

    /// Whether the state machine permits `self -> next`
    ///
    /// Self-transitions are not permitted.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Queued, JobStatus::Active)
                | (JobStatus::Queued, JobStatus::Failed)
                | (JobStatus::Active, JobStatus::Processed)
                | (JobStatus::Active, JobStatus::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "active" => Ok(JobStatus::Active),
            "processed" => Ok(JobStatus::Processed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(DocketError::invalid_input(format!(
                "unknown job status '{}'",
                other
            ))),
        }
    }
}

/// A unit of deferred work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Document id of the job
    pub id: DocumentId,
    /// Handler identifier
    pub name: String,
    /// Opaque context for the handler
    pub context: Payload,
    /// Current status
    pub status: JobStatus,
    /// Not eligible before this instant
    #[serde(with = "timestamp::rfc3339")]
    pub run_after: Timestamp,
    /// Creation time
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: Timestamp,
    /// Last status change
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: Timestamp,
}

impl Job {
    /// Slot values for a job record
    pub fn slots(name: &str, status: JobStatus, run_after: Timestamp) -> Slots {
        Slots::new()
            .with(STATUS_SLOT, status.as_str())
            .with(NAME_SLOT, name)
            .with(RUN_AFTER_SLOT, run_after.to_rfc3339())
    }

    /// Status recorded on a job document
    pub fn status_of(doc: &Document) -> DocketResult<JobStatus> {
        doc.slot(STATUS_SLOT)
            .ok_or_else(|| DocketError::storage(format!("job {} has no status", doc.id)))?
            .parse()
    }

    /// Project a stored document onto the job shape
    ///
    /// The caller is responsible for checking the document type.
    pub fn from_document(doc: Document) -> DocketResult<Job> {
        let status = Job::status_of(&doc)?;
        let name = doc
            .slot(NAME_SLOT)
            .ok_or_else(|| DocketError::storage(format!("job {} has no name", doc.id)))?
            .to_string();
        let run_after_text = doc
            .slot(RUN_AFTER_SLOT)
            .ok_or_else(|| DocketError::storage(format!("job {} has no runAfter", doc.id)))?;
        let run_after = Timestamp::parse_rfc3339(run_after_text).ok_or_else(|| {
            DocketError::storage(format!(
                "job {} has malformed runAfter '{}'",
                doc.id, run_after_text
            ))
        })?;

        Ok(Job {
            id: doc.id,
            name,
            context: doc.data,
            status,
            run_after,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }

    /// Queued and due at `now`
    pub fn is_eligible(&self, now: Timestamp) -> bool {
        self.status == JobStatus::Queued && now >= self.run_after
    }
}
