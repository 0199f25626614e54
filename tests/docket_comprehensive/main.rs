//! Docket comprehensive integration suite
//!
//! Exercises the public API end to end over the in-memory adapter:
//! query semantics, pagination, document invariants, the job queue and the
//! command executor.

#[path = "../common/mod.rs"]
mod common;

mod executor;
mod invariants;
mod jobs;
mod pagination;
mod queries;
