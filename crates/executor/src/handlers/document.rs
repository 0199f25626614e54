//! Document command handlers.

use docket_core::{DocumentId, Slots};
use docket_engine::DocumentStore;

use crate::bridge::{build_query, to_payload};
use crate::convert::convert_result;
use crate::types::QueryParams;
use crate::{Output, Result};

/// Handle Insert command.
pub fn insert(
    store: &DocumentStore,
    doc_type: String,
    version: String,
    data: serde_json::Value,
    slots: Option<Slots>,
) -> Result<Output> {
    let data = convert_result(to_payload(data))?;
    let doc = convert_result(store.insert(&doc_type, &version, data, slots))?;
    Ok(Output::Document(doc))
}

/// Handle Get command.
pub fn get(store: &DocumentStore, id: DocumentId) -> Result<Output> {
    Ok(Output::Document(convert_result(store.get(&id))?))
}

/// Handle Query command.
pub fn query(store: &DocumentStore, doc_type: String, params: QueryParams) -> Result<Output> {
    let query = convert_result(build_query(&doc_type, params))?;
    Ok(Output::QueryResult(convert_result(store.query(&query))?))
}

/// Handle Update command.
pub fn update(
    store: &DocumentStore,
    id: DocumentId,
    data: serde_json::Value,
    slots: Option<Slots>,
) -> Result<Output> {
    let partial = convert_result(to_payload(data))?;
    let doc = convert_result(store.update(&id, partial, slots))?;
    Ok(Output::Document(doc))
}

/// Handle Remove command.
pub fn remove(store: &DocumentStore, id: DocumentId) -> Result<Output> {
    convert_result(store.remove(&id))?;
    Ok(Output::Unit)
}
