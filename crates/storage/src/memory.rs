//! In-memory storage adapter
//!
//! Reference [`StorageAdapter`] used by tests, embedded callers and the
//! benches.
//!
//! # Design
//!
//! - DashMap: records keyed by id, held as MessagePack bytes
//! - SlotIndex behind a RwLock: type and slot indices for narrowed scans
//! - Every mutation takes the index write lock first, then touches the
//!   record map. That single ordering makes `modify_raw` atomic with respect
//!   to every other writer.
//! - Scans snapshot candidate ids under the index read lock, release it, and
//!   decode records lazily as the caller pulls. Records removed after the
//!   snapshot are skipped.
//!
//! # Scan accounting
//!
//! Each live scan holds a [`ScanGuard`]. `open_scans()` reports how many are
//! outstanding, which lets tests assert that abandoned iterators were
//! released.

use dashmap::DashMap;
use docket_core::traits::{ensure_same_id, Modify};
use docket_core::{
    DocketError, DocketResult, Document, DocumentId, DocumentScan, IndexHint, StorageAdapter,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::codec;
use crate::index::SlotIndex;

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<DocumentId, Vec<u8>>,
    index: RwLock<SlotIndex>,
    open_scans: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records of one type
    pub fn count_type(&self, doc_type: &str) -> usize {
        self.index.read().type_len(doc_type)
    }

    /// Scans created and not yet dropped
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::Acquire)
    }

    fn load(&self, id: &DocumentId) -> DocketResult<Document> {
        let bytes = self
            .records
            .get(id)
            .ok_or_else(|| DocketError::not_found(id))?;
        codec::decode(bytes.value())
    }
}

impl StorageAdapter for MemoryStore {
    fn insert_raw(&self, document: Document) -> DocketResult<Document> {
        let mut index = self.index.write();
        if self.records.contains_key(&document.id) {
            return Err(DocketError::AlreadyExists {
                id: document.id.to_string(),
            });
        }
        let bytes = codec::encode(&document)?;
        self.records.insert(document.id.clone(), bytes);
        index.insert(&document);
        Ok(document)
    }

    fn get_raw(&self, id: &DocumentId) -> DocketResult<Document> {
        self.load(id)
    }

    fn scan_raw<'a>(
        &'a self,
        doc_type: &str,
        hint: Option<&IndexHint>,
    ) -> DocketResult<DocumentScan<'a>> {
        let ids = self.index.read().candidates(doc_type, hint);
        debug!(
            doc_type,
            hinted = hint.is_some(),
            candidates = ids.len(),
            "memory scan opened"
        );
        Ok(Box::new(MemoryScan {
            store: self,
            ids: ids.into_iter(),
            _guard: ScanGuard::acquire(&self.open_scans),
        }))
    }

    fn update_raw(&self, id: &DocumentId, document: Document) -> DocketResult<Document> {
        ensure_same_id(id, &document)?;
        let mut index = self.index.write();
        let old = self.load(id)?;
        let bytes = codec::encode(&document)?;
        self.records.insert(id.clone(), bytes);
        index.replace(&old, &document);
        Ok(document)
    }

    fn remove_raw(&self, id: &DocumentId) -> DocketResult<()> {
        let mut index = self.index.write();
        let (_, bytes) = self
            .records
            .remove(id)
            .ok_or_else(|| DocketError::not_found(id))?;
        let old = codec::decode(&bytes)?;
        index.remove(&old);
        Ok(())
    }

    fn modify_raw(&self, id: &DocumentId, modify: &mut Modify<'_>) -> DocketResult<Document> {
        // `modify` runs under the index write lock; it must not call back
        // into this store.
        let mut index = self.index.write();
        let old = self.load(id)?;
        let next = modify(old.clone())?;
        ensure_same_id(id, &next)?;
        let bytes = codec::encode(&next)?;
        self.records.insert(id.clone(), bytes);
        index.replace(&old, &next);
        Ok(next)
    }

    fn supports_conditional_writes(&self) -> bool {
        true
    }
}

/// Live-scan marker; decrements the store's counter when dropped
#[derive(Debug)]
pub struct ScanGuard {
    counter: Arc<AtomicUsize>,
}

impl ScanGuard {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::AcqRel);
    }
}

struct MemoryScan<'a> {
    store: &'a MemoryStore,
    ids: std::vec::IntoIter<DocumentId>,
    _guard: ScanGuard,
}

impl Iterator for MemoryScan<'_> {
    type Item = DocketResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        for id in self.ids.by_ref() {
            match self.store.load(&id) {
                Ok(doc) => return Some(Ok(doc)),
                // Removed after the candidate snapshot was taken.
                Err(DocketError::NotFound { .. }) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
