//! Shared test utilities for integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Arc;

pub use docket::{
    DocumentId, DocumentStore, Direction, EngineConfig, MemoryStore, Payload, Query, SlotKey,
    Slots, Term,
};
use serde_json::json;

/// Store over a fresh in-memory adapter, with the adapter kept for inspection.
pub struct TestStore {
    pub store: DocumentStore,
    pub adapter: Arc<MemoryStore>,
}

impl TestStore {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let adapter = Arc::new(MemoryStore::new());
        let store = DocumentStore::with_config(adapter.clone(), config)
            .expect("default config is valid");
        Self { store, adapter }
    }

    /// Insert a `note` with the given `sk1`/`sk2` and return its id.
    pub fn note(&self, sk1: Option<&str>, sk2: Option<&str>) -> DocumentId {
        let mut slots = Slots::new();
        if let Some(v) = sk1 {
            slots = slots.with(SlotKey::Sk1, v);
        }
        if let Some(v) = sk2 {
            slots = slots.with(SlotKey::Sk2, v);
        }
        let data = docket::payload_from_value(json!({ "sk1": sk1, "sk2": sk2 }))
            .expect("object payload");
        self.store
            .insert("note", "1.0", data, Some(slots))
            .expect("insert note")
            .id
    }

    /// Walk every page of `query` with page size `take`, returning ids in order.
    pub fn collect_pages(&self, query: &Query, take: usize) -> Vec<DocumentId> {
        let mut ids = Vec::new();
        let mut query = query.clone().take(take);
        loop {
            let page = self.store.query(&query).expect("query page");
            ids.extend(page.documents.into_iter().map(|d| d.id));
            match page.pagination.next_cursor {
                Some(cursor) => query = query.after(cursor),
                None => return ids,
            }
        }
    }
}

/// Payload from a JSON object literal.
pub fn payload(value: serde_json::Value) -> Payload {
    docket::payload_from_value(value).expect("object payload")
}

/// Install a test-writer subscriber once so `tracing` output shows on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
