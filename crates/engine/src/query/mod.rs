//! Query construction, validation and evaluation
//!
//! ## Pipeline
//!
//! 1. [`QueryPlan::compile`] validates the query and picks an index hint
//! 2. the adapter scans the type, narrowed by the hint if it can
//! 3. every predicate is re-checked on each scanned document
//! 4. matches are sorted and sliced after the cursor position
//!
//! Each page may scan the whole type-scoped candidate set; there is no
//! cost-based planning.
//!
//! ## Example
//!
//! ```ignore
//! use docket_engine::query::{Direction, Query, Term};
//!
//! let query = Query::new("note")
//!     .filter("sk1", Term::one_of(["author:a", "author:b"]))
//!     .filter("version", Term::eq("1.0"))
//!     .order_by("createdAt", Direction::Descending)
//!     .take(20);
//! let page = store.query(&query)?;
//! ```

pub mod cursor;
pub mod filter;
pub mod key;
pub mod order;
pub mod plan;

pub use filter::{Operand, Predicate, Term};
pub use key::{IndexKey, KeyValue};
pub use order::{Direction, OrderTerm, SortKey, SortValue};
pub use plan::QueryPlan;

use docket_core::Document;
use serde::{Deserialize, Serialize};

/// A query over one document type
///
/// Keys are kept as written so that a non-indexed key is reported at query
/// time rather than silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Document type to scan
    pub doc_type: String,
    /// `where` terms, one per key
    pub filters: Vec<(String, Term)>,
    /// `orderBy` terms; empty means `createdAt` descending
    pub order_by: Vec<(String, Direction)>,
    /// Page size; `None` means the configured default
    pub take: Option<usize>,
    /// Resume after this cursor
    pub after: Option<String>,
    /// Case-insensitive substring search on `text`
    pub text: Option<String>,
}

impl Query {
    /// Query over `doc_type`
    pub fn new(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            ..Self::default()
        }
    }

    /// Add a `where` term
    pub fn filter(mut self, key: impl Into<String>, term: Term) -> Self {
        self.filters.push((key.into(), term));
        self
    }

    /// Add an `orderBy` term
    pub fn order_by(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((key.into(), direction));
        self
    }

    /// Set the page size
    pub fn take(mut self, take: usize) -> Self {
        self.take = Some(take);
        self
    }

    /// Resume after a cursor
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Search the `text` field
    pub fn text(mut self, needle: impl Into<String>) -> Self {
        self.text = Some(needle.into());
        self
    }

    /// Rewrite every `where` and `orderBy` key
    pub fn map_keys<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        for (key, _) in &mut self.filters {
            *key = f(key);
        }
        for (key, _) in &mut self.order_by {
            *key = f(key);
        }
        self
    }
}

/// Pagination block of a result page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Cursor for the next page; absent on a short page
    pub next_cursor: Option<String>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matching documents in order
    pub documents: Vec<Document>,
    /// Continuation
    pub pagination: Pagination,
}
