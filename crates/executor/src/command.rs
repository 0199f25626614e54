//! Command enum defining all Docket operations.
//!
//! Commands are the instruction set of Docket. Every operation a caller can
//! perform on the store is a variant of this enum. Commands are
//! self-contained, serializable, and hold no closures, so SDKs in other
//! languages can build them as JSON.

use docket_core::{DocumentId, JobStatus, Slots};
use serde::{Deserialize, Serialize};

use crate::types::{OrderClause, WhereClause};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Document | 5 | Raw document CRUD and queries |
/// | Collection | 2 | Schema-aware insert and list |
/// | Job | 4 | Job queue operations |
/// | Log | 1 | Log pass-through |
///
/// # Example
///
/// ```text
/// {"Query": {"type": "note", "where": {"sk1": {"eq": "a"}}, "take": 10}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Document (5) ====================
    /// Store a new document with caller-supplied slots.
    /// Returns: `Output::Document`
    #[serde(rename_all = "camelCase")]
    Insert {
        #[serde(rename = "type")]
        doc_type: String,
        version: String,
        #[serde(default)]
        data: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slots: Option<Slots>,
    },

    /// Fetch a document by id.
    /// Returns: `Output::Document`
    Get { id: DocumentId },

    /// Run a query over one document type.
    /// Returns: `Output::QueryResult`
    #[serde(rename_all = "camelCase")]
    Query {
        #[serde(rename = "type")]
        doc_type: String,
        #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
        filter: Option<WhereClause>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_by: Option<Vec<OrderClause>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        take: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    /// Merge `data` into a document and apply slot overrides.
    /// Returns: `Output::Document`
    Update {
        id: DocumentId,
        #[serde(default)]
        data: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slots: Option<Slots>,
    },

    /// Delete a document.
    /// Returns: `Output::Unit`
    Remove { id: DocumentId },

    // ==================== Collection (2) ====================
    /// Insert through a registered schema's parse hook and encoder.
    /// Returns: `Output::Document`
    CollectionInsert {
        collection: String,
        data: serde_json::Value,
    },

    /// Query a registered schema, accepting slot aliases.
    /// Returns: `Output::QueryResult`
    #[serde(rename_all = "camelCase")]
    CollectionList {
        collection: String,
        #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
        filter: Option<WhereClause>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_by: Option<Vec<OrderClause>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        take: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    // ==================== Job (4) ====================
    /// Create a queued job. `runAfter` is RFC 3339 text and defaults to now.
    /// Returns: `Output::Job`
    #[serde(rename_all = "camelCase")]
    Enqueue {
        name: String,
        #[serde(default)]
        context: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        run_after: Option<String>,
    },

    /// Fetch a job by id.
    /// Returns: `Output::Job`
    Dequeue { id: DocumentId },

    /// Move a job along its state machine.
    /// Returns: `Output::Job`
    UpdateJobStatus { id: DocumentId, status: JobStatus },

    /// List queued jobs that are due, oldest first, without claiming them.
    /// Returns: `Output::Jobs`
    NextEligible {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        take: Option<usize>,
    },

    // ==================== Log (1) ====================
    /// Hand a line to the installed log sink.
    /// Returns: `Output::Unit`
    EmitLog { body: String },
}

impl Command {
    /// Variant name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert { .. } => "Insert",
            Command::Get { .. } => "Get",
            Command::Query { .. } => "Query",
            Command::Update { .. } => "Update",
            Command::Remove { .. } => "Remove",
            Command::CollectionInsert { .. } => "CollectionInsert",
            Command::CollectionList { .. } => "CollectionList",
            Command::Enqueue { .. } => "Enqueue",
            Command::Dequeue { .. } => "Dequeue",
            Command::UpdateJobStatus { .. } => "UpdateJobStatus",
            Command::NextEligible { .. } => "NextEligible",
            Command::EmitLog { .. } => "EmitLog",
        }
    }

    /// Whether the command can change stored data
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Insert { .. }
                | Command::Update { .. }
                | Command::Remove { .. }
                | Command::CollectionInsert { .. }
                | Command::Enqueue { .. }
                | Command::UpdateJobStatus { .. }
        )
    }
}
