//! Schema-aware facade over the document store
//!
//! A `Collection` binds a [`DocumentStore`] to one registered schema:
//! payloads pass through the schema's parse hook, slots are derived by its
//! encoder, and queries may name slots by their application aliases.

use crate::query::{Query, QueryResult};
use crate::schema::SchemaDefinition;
use crate::store::DocumentStore;
use docket_core::{
    payload_from_value, DocketError, DocketResult, Document, DocumentId, Payload, SlotKey,
};
use std::sync::Arc;

/// Documents of one schema
#[derive(Debug, Clone)]
pub struct Collection {
    store: DocumentStore,
    schema: Arc<SchemaDefinition>,
}

impl Collection {
    pub(crate) fn new(store: DocumentStore, schema: Arc<SchemaDefinition>) -> Self {
        Self { store, schema }
    }

    /// The schema this collection writes
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// A query over this collection's type
    pub fn query(&self) -> Query {
        Query::new(self.schema.name())
    }

    fn ensure_writable(&self) -> DocketResult<()> {
        if self.schema.is_read_only() {
            return Err(DocketError::configuration(format!(
                "collection '{}' is read-only",
                self.schema.name()
            )));
        }
        Ok(())
    }

    /// Parse, encode and insert a payload
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the parse hook rejects the payload;
    /// `Configuration` if the collection is read-only.
    pub fn insert(&self, data: Payload) -> DocketResult<Document> {
        self.ensure_writable()?;
        let data = self.schema.parse(data)?;
        let slots = self.schema.encode(&data);
        self.store.insert(
            self.schema.name(),
            self.schema.version(),
            data,
            Some(slots),
        )
    }

    /// [`insert`](Self::insert) for an arbitrary JSON value
    pub fn insert_value(&self, data: serde_json::Value) -> DocketResult<Document> {
        self.insert(payload_from_value(data)?)
    }

    /// Fetch a document of this type
    ///
    /// # Errors
    ///
    /// `NotFound` if absent or of another type.
    pub fn get(&self, id: &DocumentId) -> DocketResult<Document> {
        let doc = self.store.get(id)?;
        if doc.doc_type != self.schema.name() {
            return Err(DocketError::not_found(id));
        }
        Ok(doc)
    }

    /// Run a query, translating alias keys to slots
    ///
    /// Raw slot names are accepted alongside aliases. An empty query type is
    /// filled in; a different one is a `Configuration` error.
    pub fn list(&self, query: Query) -> DocketResult<QueryResult> {
        let mut query = query;
        if query.doc_type.is_empty() {
            query.doc_type = self.schema.name().to_string();
        } else if query.doc_type != self.schema.name() {
            return Err(DocketError::configuration(format!(
                "collection '{}' cannot run a query over '{}'",
                self.schema.name(),
                query.doc_type
            )));
        }
        let query = query.map_keys(|key| self.schema.resolve_key(key).to_string());
        self.store.query(&query)
    }

    /// Merge `partial`, re-validate, and re-derive every slot
    ///
    /// The parse hook and encoder run inside the store's read-modify-write;
    /// they must not call back into the store.
    pub fn update(&self, id: &DocumentId, partial: Payload) -> DocketResult<Document> {
        self.ensure_writable()?;
        let schema = Arc::clone(&self.schema);
        self.store.modify(id, |mut doc: Document| {
            if doc.doc_type != schema.name() {
                return Err(DocketError::not_found(&doc.id));
            }
            doc.merge(partial.clone());
            doc.data = schema.parse(std::mem::take(&mut doc.data))?;
            let slots = schema.encode(&doc.data);
            for slot in SlotKey::ALL {
                *doc.slot_mut(slot) = slots.get(slot).map(str::to_string);
            }
            doc.text = slots.text;
            Ok(doc)
        })
    }

    /// Delete a document of this type
    pub fn remove(&self, id: &DocumentId) -> DocketResult<()> {
        self.ensure_writable()?;
        self.get(id)?;
        self.store.remove(id)
    }
}
