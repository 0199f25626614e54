//! Query engine for Docket
//!
//! This crate sits between callers and a storage adapter:
//! - DocumentStore: insert, get, query, update and remove over any adapter
//! - query: `where` terms, ordering, cursors and the query planner
//! - SchemaRegistry: index encoders and alias tables per document type
//! - Collection: schema-aware facade that parses, encodes and translates aliases
//! - JobQueue: job documents with a status state machine
//! - EngineConfig: page-size limits and the job type, optionally from `docket.toml`
//! - LogSink: pass-through for application log lines
//!
//! The engine owns all filtering, sorting and pagination. Adapters only
//! store records and scan them by type.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod config;
pub mod jobs;
pub mod logs;
pub mod query;
pub mod schema;
pub mod store;

pub use collection::Collection;
pub use config::{EngineConfig, CONFIG_FILE_NAME};
pub use jobs::JobQueue;
pub use logs::{LogSink, MemoryLogSink, TracingLogSink};
pub use query::{Direction, Operand, Pagination, Query, QueryResult, Term};
pub use schema::{SchemaDefinition, SchemaRegistry, SlotBinding};
pub use store::DocumentStore;
