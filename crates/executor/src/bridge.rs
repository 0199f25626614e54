//! Bridge module: conversions between wire values and engine types.
//!
//! - [`to_payload`]: JSON value to document payload
//! - [`parse_run_after`]: RFC 3339 text to [`Timestamp`]
//! - [`build_query`]: [`QueryParams`] to an engine [`Query`]

use docket_core::{payload_from_value, DocketError, DocketResult, Payload, Timestamp};
use docket_engine::Query;

use crate::types::QueryParams;

/// Convert a JSON value into a payload; `null` becomes an empty object.
pub fn to_payload(value: serde_json::Value) -> DocketResult<Payload> {
    match value {
        serde_json::Value::Null => Ok(Payload::new()),
        other => payload_from_value(other),
    }
}

/// Parse an optional `runAfter` timestamp.
pub fn parse_run_after(text: Option<&str>) -> DocketResult<Option<Timestamp>> {
    match text {
        None => Ok(None),
        Some(text) => Timestamp::parse_rfc3339(text).map(Some).ok_or_else(|| {
            DocketError::invalid_input(format!("runAfter '{}' is not an RFC 3339 timestamp", text))
        }),
    }
}

/// Build an engine query over `doc_type` from its wire form.
///
/// # Errors
///
/// `Configuration` if an `orderBy` entry does not hold exactly one key.
pub fn build_query(doc_type: &str, params: QueryParams) -> DocketResult<Query> {
    let mut query = Query::new(doc_type);
    for (key, term) in params.filter.unwrap_or_default() {
        query = query.filter(key, term);
    }
    for clause in params.order_by.unwrap_or_default() {
        if clause.len() != 1 {
            return Err(DocketError::configuration(format!(
                "orderBy entries must name exactly one key, got {}",
                clause.len()
            )));
        }
        for (key, direction) in clause {
            query = query.order_by(key, direction);
        }
    }
    query.take = params.take;
    query.after = params.after;
    query.text = params.text;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderClause, WhereClause};
    use docket_engine::{Direction, Term};
    use serde_json::json;

    #[test]
    fn test_null_payload_is_empty() {
        assert!(to_payload(serde_json::Value::Null).unwrap().is_empty());
        assert!(to_payload(json!("text")).is_err());
        assert_eq!(to_payload(json!({"a": 1})).unwrap()["a"], 1);
    }

    #[test]
    fn test_parse_run_after() {
        assert_eq!(parse_run_after(None).unwrap(), None);
        let ts = parse_run_after(Some("2024-01-02T03:04:05Z")).unwrap().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-02T03:04:05.000000Z");
        assert!(matches!(
            parse_run_after(Some("tomorrow")).unwrap_err(),
            DocketError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_build_query_from_wire_form() {
        let order: Vec<OrderClause> =
            serde_json::from_value(json!([{"sk2": "ascending"}, {"createdAt": "desc"}])).unwrap();
        let params = QueryParams {
            filter: Some(WhereClause::from([("sk1".to_string(), Term::eq("a"))])),
            order_by: Some(order),
            take: Some(5),
            ..QueryParams::default()
        };
        let query = build_query("note", params).unwrap();
        assert_eq!(query.doc_type, "note");
        assert_eq!(query.filters, vec![("sk1".to_string(), Term::eq("a"))]);
        assert_eq!(
            query.order_by,
            vec![
                ("sk2".to_string(), Direction::Ascending),
                ("createdAt".to_string(), Direction::Descending),
            ]
        );
        assert_eq!(query.take, Some(5));
    }

    #[test]
    fn test_order_entry_must_have_one_key() {
        let clause = OrderClause::from([
            ("sk1".to_string(), Direction::Ascending),
            ("sk2".to_string(), Direction::Descending),
        ]);
        let params = QueryParams {
            order_by: Some(vec![clause]),
            ..QueryParams::default()
        };
        assert!(build_query("note", params).unwrap_err().is_configuration());
    }
}
