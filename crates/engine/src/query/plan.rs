//! Query validation and planning
//!
//! [`QueryPlan::compile`] turns a caller-facing [`Query`] into everything
//! the executor loop needs: typed predicates, the effective order, the page
//! size, the decoded cursor position and the scan hint. Every validation
//! error surfaces here, before the adapter is touched.

use super::cursor;
use super::filter::Predicate;
use super::key::IndexKey;
use super::order::{compare, validate_order, OrderTerm, SortKey};
use super::Query;
use crate::config::EngineConfig;
use docket_core::{DocketError, DocketResult, Document, IndexHint, SlotKey};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Validated, executable form of a [`Query`]
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Type scanned
    pub doc_type: String,
    /// AND-ed predicates
    pub predicates: Vec<Predicate>,
    /// Lower-cased text needle
    pub text: Option<String>,
    /// Effective order (never empty)
    pub order: Vec<OrderTerm>,
    /// Page size
    pub take: usize,
    /// Resume strictly after this position
    pub after: Option<SortKey>,
    /// Narrowing hint passed to the adapter
    pub hint: Option<IndexHint>,
}

impl QueryPlan {
    /// Validate `query` under `config`
    ///
    /// # Errors
    ///
    /// `Configuration` for an empty type, a non-indexed or repeated `where`
    /// key, an ill-typed term, an unknown or repeated `orderBy` key, or a
    /// `take` of zero or above the ceiling. `InvalidCursor` for a cursor
    /// that does not belong to this query.
    pub fn compile(query: &Query, config: &EngineConfig) -> DocketResult<Self> {
        if query.doc_type.is_empty() {
            return Err(DocketError::configuration("query type must not be empty"));
        }

        let mut seen = HashSet::new();
        let mut predicates = Vec::with_capacity(query.filters.len());
        for (raw_key, term) in &query.filters {
            let key: IndexKey = raw_key.parse()?;
            if !seen.insert(key) {
                return Err(DocketError::configuration(format!(
                    "more than one predicate on key '{}'",
                    key
                )));
            }
            predicates.push(Predicate::compile(key, term)?);
        }

        let order = validate_order(
            query
                .order_by
                .iter()
                .map(|(raw_key, direction)| {
                    raw_key
                        .parse()
                        .map(|key| OrderTerm::new(key, *direction))
                })
                .collect::<DocketResult<_>>()?,
        )?;

        let take = query.take.unwrap_or(config.default_take);
        if take == 0 || take > config.max_take {
            return Err(DocketError::configuration(format!(
                "take must be between 1 and {}, got {}",
                config.max_take, take
            )));
        }

        let after = match &query.after {
            Some(token) => Some(cursor::decode(token, &query.doc_type, &order)?),
            None => None,
        };

        let text = query
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let hint = choose_hint(&predicates);

        Ok(QueryPlan {
            doc_type: query.doc_type.clone(),
            predicates,
            text,
            order,
            take,
            after,
            hint,
        })
    }

    /// Residual filter: type, every predicate, and the text search
    pub fn matches(&self, doc: &Document) -> bool {
        doc.doc_type == self.doc_type
            && self.predicates.iter().all(|p| p.matches(doc))
            && match &self.text {
                Some(needle) => doc
                    .text
                    .as_deref()
                    .map(|t| t.to_lowercase().contains(needle.as_str()))
                    .unwrap_or(false),
                None => true,
            }
    }

    /// Whether `key` sorts strictly after the cursor position
    pub fn is_past_cursor(&self, key: &SortKey) -> bool {
        match &self.after {
            Some(after) => compare(&self.order, key, after) == Ordering::Greater,
            None => true,
        }
    }
}

/// First non-negated `eq` on a slot, in slot order `sk1..sk4`
pub fn choose_hint(predicates: &[Predicate]) -> Option<IndexHint> {
    SlotKey::ALL.iter().find_map(|slot| {
        predicates
            .iter()
            .filter(|p| p.key() == IndexKey::Slot(*slot))
            .find_map(|p| p.equality_values())
            .map(|values| IndexHint::new(*slot, values.to_vec()))
    })
}
