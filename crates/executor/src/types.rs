//! Wire-level helper types shared by commands and handlers.

use docket_engine::{Direction, Term};
use std::collections::BTreeMap;

/// `where` clause: index key or alias to term
pub type WhereClause = BTreeMap<String, Term>;

/// One `orderBy` entry, written as `{"<key>": "ascending"}`
///
/// Exactly one key per entry; anything else is rejected when the command
/// runs.
pub type OrderClause = BTreeMap<String, Direction>;

/// Query fields shared by `Query` and `CollectionList`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Filter terms, all of which must hold
    pub filter: Option<WhereClause>,
    /// Sort terms, left to right
    pub order_by: Option<Vec<OrderClause>>,
    /// Page size
    pub take: Option<usize>,
    /// Cursor from a previous page
    pub after: Option<String>,
    /// Case-insensitive substring search on `text`
    pub text: Option<String>,
}
