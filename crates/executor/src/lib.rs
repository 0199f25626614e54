//! # Docket Executor
//!
//! Serializable command interface over the Docket engine.
//!
//! - [`Command`]/[`Output`]: every operation and its result as plain data
//! - [`Executor`]: dispatches commands to the store, job queue and log sink
//! - [`Error`]: structured, serializable failures
//!
//! ## Quick Start
//!
//! ```text
//! use docket_executor::{Command, Executor, Output};
//!
//! let executor = Executor::in_memory()?;
//! let cmd: Command = serde_json::from_str(
//!     r#"{"Insert": {"type": "note", "version": "1.0", "data": {}, "slots": {"sk1": "a"}}}"#,
//! )?;
//! let Output::Document(doc) = executor.execute(cmd)? else { return Ok(()) };
//! ```

#![warn(missing_docs)]

pub(crate) mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::{OrderClause, QueryParams, WhereClause};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
