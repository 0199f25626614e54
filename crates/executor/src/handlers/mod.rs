//! Command handlers organized by category.
//!
//! | Module | Commands | Backing handle |
//! |--------|----------|----------------|
//! | `document` | 5 | DocumentStore |
//! | `collection` | 2 | Collection |
//! | `job` | 4 | JobQueue |
//! | `log` | 1 | LogSink |

pub mod collection;
pub mod document;
pub mod job;
pub mod log;
