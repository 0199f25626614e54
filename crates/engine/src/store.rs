//! DocumentStore: the query engine over a storage adapter
//!
//! ## Design
//!
//! `DocumentStore` is a cheap-to-clone handle (`Arc` inside). It holds no
//! per-request state; every operation is a single synchronous call that
//! validates its input, talks to the adapter and returns.
//!
//! All filtering, sorting and pagination happens here. The adapter is only
//! asked for a type-scoped scan, optionally narrowed by an [`IndexHint`].
//!
//! ## Example
//!
//! ```ignore
//! use docket_engine::{DocumentStore, Query, Term};
//! use docket_storage::MemoryStore;
//!
//! let store = DocumentStore::new(Arc::new(MemoryStore::new()))?;
//! let doc = store.insert("note", "1.0", payload, Some(slots))?;
//! let page = store.query(&Query::new("note").filter("sk1", Term::eq("a")))?;
//! ```
//!
//! [`IndexHint`]: docket_core::IndexHint

use crate::collection::Collection;
use crate::config::EngineConfig;
use crate::jobs::JobQueue;
use crate::query::order::compare;
use crate::query::{cursor, Pagination, Query, QueryPlan, QueryResult, SortKey};
use crate::schema::{SchemaDefinition, SchemaRegistry};
use docket_core::{
    DocketError, DocketResult, Document, DocumentId, Payload, Slots, StorageAdapter, Timestamp,
};
use std::sync::Arc;
use tracing::debug;

struct Inner {
    adapter: Arc<dyn StorageAdapter>,
    config: EngineConfig,
    schemas: SchemaRegistry,
}

/// Query engine handle
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<Inner>,
}

impl DocumentStore {
    /// Engine over `adapter` with the default configuration
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> DocketResult<Self> {
        Self::with_config(adapter, EngineConfig::default())
    }

    /// Engine over `adapter` with `config`
    ///
    /// # Errors
    ///
    /// `Configuration` if `config` does not validate.
    pub fn with_config(adapter: Arc<dyn StorageAdapter>, config: EngineConfig) -> DocketResult<Self> {
        config.validate()?;
        let schemas = SchemaRegistry::with_job_schema(&config.job_type)?;
        Ok(Self {
            inner: Arc::new(Inner {
                adapter,
                config,
                schemas,
            }),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Underlying adapter
    pub fn adapter(&self) -> &Arc<dyn StorageAdapter> {
        &self.inner.adapter
    }

    /// Registered schemas
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.inner.schemas
    }

    /// Register a schema and return its collection
    pub fn register_schema(&self, schema: SchemaDefinition) -> DocketResult<Collection> {
        let schema = self.inner.schemas.register(schema)?;
        Ok(Collection::new(self.clone(), schema))
    }

    /// Collection for a registered schema
    ///
    /// # Errors
    ///
    /// `Configuration` if no schema is registered under `name`.
    pub fn collection(&self, name: &str) -> DocketResult<Collection> {
        let schema = self.inner.schemas.get(name).ok_or_else(|| {
            DocketError::configuration(format!("no schema registered as '{}'", name))
        })?;
        Ok(Collection::new(self.clone(), schema))
    }

    /// Job queue sharing this store
    pub fn jobs(&self) -> JobQueue {
        JobQueue::new(self.clone())
    }

    /// Insert a new document
    ///
    /// Slots are taken verbatim from `slots`; nothing is derived from the
    /// payload here.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty type; adapter errors are passed through.
    pub fn insert(
        &self,
        doc_type: &str,
        version: &str,
        data: Payload,
        slots: Option<Slots>,
    ) -> DocketResult<Document> {
        if doc_type.is_empty() {
            return Err(DocketError::invalid_input("document type must not be empty"));
        }
        let doc = Document::new(
            doc_type,
            version,
            data,
            slots.unwrap_or_default(),
            Timestamp::now(),
        );
        let doc = self.inner.adapter.insert_raw(doc)?;
        debug!(id = %doc.id, doc_type, "document inserted");
        Ok(doc)
    }

    /// Fetch one document
    pub fn get(&self, id: &DocumentId) -> DocketResult<Document> {
        self.inner.adapter.get_raw(id)
    }

    /// Run a query and return one page
    pub fn query(&self, query: &Query) -> DocketResult<QueryResult> {
        let plan = QueryPlan::compile(query, &self.inner.config)?;
        self.execute(&plan)
    }

    /// Run a compiled plan
    pub fn execute(&self, plan: &QueryPlan) -> DocketResult<QueryResult> {
        let mut scanned = 0usize;
        let mut hits: Vec<(SortKey, Document)> = Vec::new();
        {
            let scan = self
                .inner
                .adapter
                .scan_raw(&plan.doc_type, plan.hint.as_ref())?;
            for item in scan {
                let doc = item?;
                scanned += 1;
                if !plan.matches(&doc) {
                    continue;
                }
                let key = SortKey::of(&doc, &plan.order);
                if plan.is_past_cursor(&key) {
                    hits.push((key, doc));
                }
            }
        }

        hits.sort_by(|(a, _), (b, _)| compare(&plan.order, a, b));
        hits.truncate(plan.take);

        let next_cursor = if hits.len() == plan.take {
            match hits.last() {
                Some((last, _)) => Some(cursor::encode(&plan.doc_type, &plan.order, last)?),
                None => None,
            }
        } else {
            None
        };

        debug!(
            doc_type = %plan.doc_type,
            hinted = plan.hint.is_some(),
            scanned,
            returned = hits.len(),
            "query executed"
        );

        Ok(QueryResult {
            documents: hits.into_iter().map(|(_, doc)| doc).collect(),
            pagination: Pagination { next_cursor },
        })
    }

    /// Merge `partial` into a document and apply slot overrides
    ///
    /// Runs as one read-modify-write through the adapter. `updatedAt` moves
    /// forward; `createdAt`, `id` and `type` never change.
    pub fn update(
        &self,
        id: &DocumentId,
        partial: Payload,
        slots: Option<Slots>,
    ) -> DocketResult<Document> {
        let doc = self.inner.adapter.modify_raw(id, &mut |mut doc: Document| {
            doc.merge(partial.clone());
            if let Some(slots) = &slots {
                doc.apply_slots(slots);
            }
            doc.touch(Timestamp::now());
            Ok(doc)
        })?;
        debug!(id = %doc.id, "document updated");
        Ok(doc)
    }

    /// Read-modify-write with a caller-supplied step
    ///
    /// `modify` may return an error to abort without writing. It must not
    /// change `id`, `type` or `createdAt`; attempts to do so are rejected.
    pub fn modify<F>(&self, id: &DocumentId, mut modify: F) -> DocketResult<Document>
    where
        F: FnMut(Document) -> DocketResult<Document>,
    {
        self.inner.adapter.modify_raw(id, &mut |doc: Document| {
            let (doc_type, created_at) = (doc.doc_type.clone(), doc.created_at);
            let mut next = modify(doc)?;
            if next.doc_type != doc_type || next.created_at != created_at {
                return Err(DocketError::invalid_input(format!(
                    "document {} may not change its type or creation time",
                    next.id
                )));
            }
            next.touch(Timestamp::now());
            Ok(next)
        })
    }

    /// Delete a document
    pub fn remove(&self, id: &DocumentId) -> DocketResult<()> {
        self.inner.adapter.remove_raw(id)?;
        debug!(id = %id, "document removed");
        Ok(())
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("config", &self.inner.config)
            .field("schemas", &self.inner.schemas.names())
            .finish()
    }
}
