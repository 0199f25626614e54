//! Docket - schema-flexible document store with slot-indexed queries
//!
//! Docket stores JSON documents of any type, indexes each through four
//! generic string slots (`sk1..sk4`) plus a free-text field, and answers
//! filtered, ordered, cursor-paginated queries over them. A job queue with
//! a status state machine is layered on the same store.
//!
//! # Quick Start
//!
//! ```ignore
//! use docket::{DocumentStore, MemoryStore, Query, Term, Slots, SlotKey};
//! use std::sync::Arc;
//!
//! let store = DocumentStore::new(Arc::new(MemoryStore::new()))?;
//! store.insert("note", "1.0", Default::default(), Some(Slots::new().with(SlotKey::Sk1, "a")))?;
//!
//! let page = store.query(&Query::new("note").filter("sk1", Term::eq("a")))?;
//! ```
//!
//! # Architecture
//!
//! Typed access goes through [`DocumentStore`], [`Collection`] and
//! [`JobQueue`]. The [`Executor`] accepts the same operations as
//! serializable [`Command`] values for SDKs and remote callers.

pub use docket_core::{
    payload_from_value, DocketError, DocketResult, Document, DocumentId, IndexHint, Job,
    JobStatus, Payload, SlotKey, Slots, StorageAdapter, Timestamp, METADATA_KEYS,
};
pub use docket_engine::{
    Collection, Direction, DocumentStore, EngineConfig, JobQueue, LogSink, MemoryLogSink,
    Operand, Pagination, Query, QueryResult, SchemaDefinition, SchemaRegistry, SlotBinding, Term,
    TracingLogSink, CONFIG_FILE_NAME,
};
pub use docket_executor::{Command, Error, Executor, OrderClause, Output, WhereClause};
pub use docket_storage::MemoryStore;
