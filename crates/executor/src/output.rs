//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant; the mapping is listed
//! on each [`Command`](crate::Command) variant.

use docket_core::{Document, Job};
use docket_engine::QueryResult;
use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// # Example
///
/// ```text
/// match executor.execute(Command::Get { id })? {
///     Output::Document(doc) => println!("{}", doc.id),
///     other => println!("unexpected {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (remove, emitLog)
    Unit,

    /// A single stored document
    Document(Document),

    /// One page of query results
    QueryResult(QueryResult),

    /// A single job
    Job(Job),

    /// Several jobs
    Jobs(Vec<Job>),
}
