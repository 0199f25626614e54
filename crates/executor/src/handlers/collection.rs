//! Collection command handlers.
//!
//! Collections are registered from Rust because parse hooks and encoders are
//! code; commands address them by schema name.

use docket_engine::DocumentStore;

use crate::bridge::build_query;
use crate::convert::convert_result;
use crate::types::QueryParams;
use crate::{Output, Result};

/// Handle CollectionInsert command.
pub fn insert(store: &DocumentStore, collection: String, data: serde_json::Value) -> Result<Output> {
    let collection = convert_result(store.collection(&collection))?;
    Ok(Output::Document(convert_result(collection.insert_value(data))?))
}

/// Handle CollectionList command.
///
/// The query type is the collection's own; keys may be aliases.
pub fn list(store: &DocumentStore, collection: String, params: QueryParams) -> Result<Output> {
    let collection = convert_result(store.collection(&collection))?;
    let query = convert_result(build_query("", params))?;
    Ok(Output::QueryResult(convert_result(collection.list(query))?))
}
