//! Result ordering
//!
//! Sorting is stable over the `orderBy` terms left to right, with `id`
//! ascending as the final tiebreak. Unset slots sort before any value when
//! ascending (and therefore last when descending).

use super::key::{IndexKey, KeyValue};
use docket_core::{DocketError, DocketResult, Document, DocumentId, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest first
    #[serde(alias = "asc")]
    Ascending,
    /// Largest first
    #[serde(alias = "desc")]
    Descending,
}

impl Direction {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" => Ok(Direction::Ascending),
            "descending" | "desc" => Ok(Direction::Descending),
            other => Err(DocketError::configuration(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

/// One `orderBy` term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    /// Sort key
    pub key: IndexKey,
    /// Direction
    pub direction: Direction,
}

impl OrderTerm {
    /// Term on `key` in `direction`
    pub fn new(key: IndexKey, direction: Direction) -> Self {
        Self { key, direction }
    }
}

/// Order used when a query gives none: newest first
pub fn default_order() -> Vec<OrderTerm> {
    vec![OrderTerm::new(IndexKey::CreatedAt, Direction::Descending)]
}

/// Reject repeated keys; an empty list means the default order
pub fn validate_order(terms: Vec<OrderTerm>) -> DocketResult<Vec<OrderTerm>> {
    if terms.is_empty() {
        return Ok(default_order());
    }
    let mut seen = HashSet::new();
    for term in &terms {
        if !seen.insert(term.key) {
            return Err(DocketError::configuration(format!(
                "orderBy repeats key '{}'",
                term.key
            )));
        }
    }
    Ok(terms)
}

/// Owned sort-key component
///
/// Variant order puts `Null` first, which is the unset-slot rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    /// Unset slot
    Null,
    /// Slot or version text
    Text(String),
    /// Timestamp
    Time(Timestamp),
}

impl From<KeyValue<'_>> for SortValue {
    fn from(value: KeyValue<'_>) -> Self {
        match value {
            KeyValue::Text(None) => SortValue::Null,
            KeyValue::Text(Some(v)) => SortValue::Text(v.to_string()),
            KeyValue::Time(t) => SortValue::Time(t),
        }
    }
}

/// Sort position of a document: key tuple plus id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// One value per order term
    pub values: Vec<SortValue>,
    /// Final tiebreak
    pub id: DocumentId,
}

impl SortKey {
    /// Position of `doc` under `order`
    pub fn of(doc: &Document, order: &[OrderTerm]) -> Self {
        Self {
            values: order
                .iter()
                .map(|term| SortValue::from(term.key.read(doc)))
                .collect(),
            id: doc.id.clone(),
        }
    }
}

/// Compare two positions under `order`
pub fn compare(order: &[OrderTerm], a: &SortKey, b: &SortKey) -> Ordering {
    order
        .iter()
        .zip(a.values.iter().zip(b.values.iter()))
        .map(|(term, (x, y))| term.direction.apply(x.cmp(y)))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or_else(|| a.id.cmp(&b.id))
}
