//! Pagination cursors
//!
//! A cursor is URL-safe base64 (no padding) of a JSON envelope:
//!
//! ```text
//! { "v": 1, "type": "note", "order": [["sk1", "ascending"]],
//!   "keys": ["a"], "id": "…" }
//! ```
//!
//! It carries the order it was produced under and the document type, so a
//! cursor replayed against a different query is rejected instead of
//! silently resuming at a meaningless position.

use super::key::IndexKey;
use super::order::{Direction, OrderTerm, SortKey, SortValue};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use docket_core::{DocketError, DocketResult, DocumentId, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::warn;

const CURSOR_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    v: u32,
    #[serde(rename = "type")]
    doc_type: String,
    order: Vec<(IndexKey, Direction)>,
    keys: Vec<Option<String>>,
    id: String,
}

/// Encode the position of `last` for a query over `doc_type` sorted by `order`
pub fn encode(doc_type: &str, order: &[OrderTerm], last: &SortKey) -> DocketResult<String> {
    let envelope = Envelope {
        v: CURSOR_VERSION,
        doc_type: doc_type.to_string(),
        order: order.iter().map(|t| (t.key, t.direction)).collect(),
        keys: last
            .values
            .iter()
            .map(|value| match value {
                SortValue::Null => None,
                SortValue::Text(text) => Some(text.clone()),
                SortValue::Time(t) => Some(t.to_rfc3339()),
            })
            .collect(),
        id: last.id.to_string(),
    };
    let json = serde_json::to_vec(&envelope)?;
    Ok(BASE64.encode(json))
}

/// Decode a cursor and check it belongs to this query
///
/// # Errors
///
/// `InvalidCursor` if the token is malformed or was produced for a
/// different type or order.
pub fn decode(token: &str, doc_type: &str, order: &[OrderTerm]) -> DocketResult<SortKey> {
    decode_inner(token, doc_type, order).map_err(|reason| {
        warn!(doc_type, %reason, "rejected cursor");
        DocketError::invalid_cursor(reason)
    })
}

fn decode_inner(token: &str, doc_type: &str, order: &[OrderTerm]) -> Result<SortKey, String> {
    let bytes = BASE64
        .decode(token)
        .map_err(|e| format!("not base64: {}", e))?;
    let envelope: Envelope =
        serde_json::from_slice(&bytes).map_err(|e| format!("bad envelope: {}", e))?;

    if envelope.v != CURSOR_VERSION {
        return Err(format!("unsupported cursor version {}", envelope.v));
    }
    if envelope.doc_type != doc_type {
        return Err(format!(
            "cursor was issued for type '{}', not '{}'",
            envelope.doc_type, doc_type
        ));
    }
    let expected: Vec<(IndexKey, Direction)> =
        order.iter().map(|t| (t.key, t.direction)).collect();
    if envelope.order != expected {
        return Err("cursor was issued for a different orderBy".to_string());
    }
    if envelope.keys.len() != order.len() {
        return Err("cursor key count does not match orderBy".to_string());
    }
    if envelope.id.is_empty() {
        return Err("cursor has an empty id".to_string());
    }

    let values = order
        .iter()
        .zip(envelope.keys)
        .map(|(term, key)| sort_value(term.key, key))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SortKey {
        values,
        id: DocumentId::new(envelope.id),
    })
}

fn sort_value(key: IndexKey, raw: Option<String>) -> Result<SortValue, String> {
    match (key, raw) {
        (IndexKey::Slot(_), None) => Ok(SortValue::Null),
        (k, None) => Err(format!("cursor has no value for '{}'", k)),
        (k, Some(text)) if k.is_timestamp() => Timestamp::parse_rfc3339(&text)
            .map(SortValue::Time)
            .ok_or_else(|| format!("cursor value for '{}' is not a timestamp", k)),
        (_, Some(text)) => Ok(SortValue::Text(text)),
    }
}
