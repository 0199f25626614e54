//! Storage adapter contract
//!
//! The engine performs all filtering, sorting and pagination itself. From
//! its backing store it needs only the narrow interface below, which lets a
//! key-value store, a document database or a plain in-memory map sit
//! underneath without changing the upper layers.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (requires Send + Sync).

use crate::document::Document;
use crate::error::{DocketError, DocketResult};
use crate::types::{DocumentId, SlotKey};

/// Lazy sequence of documents returned by [`StorageAdapter::scan_raw`]
///
/// The engine may stop iterating at any point. Implementations must release
/// whatever they hold (locks, cursors, file handles) when the iterator is
/// dropped, whether it was exhausted, abandoned early or stopped on error.
pub type DocumentScan<'a> = Box<dyn Iterator<Item = DocketResult<Document>> + Send + 'a>;

/// Narrowing hint passed to [`StorageAdapter::scan_raw`]
///
/// "Only documents whose `slot` equals one of `values` can match." Adapters
/// that keep a secondary index on the slot may use it; others ignore it.
/// The engine re-checks every predicate, so honoring the hint is purely an
/// optimization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    /// Slot the equality applies to
    pub slot: SlotKey,
    /// Accepted values (one-of)
    pub values: Vec<String>,
}

impl IndexHint {
    /// Hint for `slot` equal to any of `values`
    pub fn new(slot: SlotKey, values: Vec<String>) -> Self {
        Self { slot, values }
    }

    /// Whether a document satisfies the hint
    pub fn admits(&self, doc: &Document) -> bool {
        doc.slot(self.slot)
            .map(|v| self.values.iter().any(|x| x == v))
            .unwrap_or(false)
    }
}

/// Read-modify-write step for [`StorageAdapter::modify_raw`]
///
/// Receives the current record and returns the record to write, or an error
/// to abort without writing.
pub type Modify<'a> = dyn FnMut(Document) -> DocketResult<Document> + 'a;

/// Backing store interface
///
/// # Examples
///
/// ```ignore
/// use docket_core::traits::StorageAdapter;
///
/// let doc = adapter.insert_raw(doc)?;
/// let same = adapter.get_raw(&doc.id)?;
/// for doc in adapter.scan_raw("note", None)?.take(10) {
///     println!("{}", doc?.id);
/// }
/// ```
pub trait StorageAdapter: Send + Sync {
    /// Persist a new record
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the id is taken; `Storage` on backend failure.
    fn insert_raw(&self, document: Document) -> DocketResult<Document>;

    /// Fetch a record by id
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    fn get_raw(&self, id: &DocumentId) -> DocketResult<Document>;

    /// Iterate records of one type, optionally narrowed by `hint`
    ///
    /// Order is unspecified. The iterator may yield records that do not
    /// satisfy the hint.
    fn scan_raw<'a>(
        &'a self,
        doc_type: &str,
        hint: Option<&IndexHint>,
    ) -> DocketResult<DocumentScan<'a>>;

    /// Replace a record
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    fn update_raw(&self, id: &DocumentId, document: Document) -> DocketResult<Document>;

    /// Delete a record
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    fn remove_raw(&self, id: &DocumentId) -> DocketResult<()>;

    /// Read-modify-write of one record
    ///
    /// Adapters that support conditional writes should override this so the
    /// read, the `modify` step and the write happen atomically. The default
    /// is a plain get-then-update and offers no protection against a
    /// concurrent writer.
    fn modify_raw(&self, id: &DocumentId, modify: &mut Modify<'_>) -> DocketResult<Document> {
        let current = self.get_raw(id)?;
        let next = modify(current)?;
        self.update_raw(id, next)
    }

    /// Whether `modify_raw` is atomic for this adapter
    fn supports_conditional_writes(&self) -> bool {
        false
    }
}

impl<T: StorageAdapter + ?Sized> StorageAdapter for std::sync::Arc<T> {
    fn insert_raw(&self, document: Document) -> DocketResult<Document> {
        (**self).insert_raw(document)
    }

    fn get_raw(&self, id: &DocumentId) -> DocketResult<Document> {
        (**self).get_raw(id)
    }

    fn scan_raw<'a>(
        &'a self,
        doc_type: &str,
        hint: Option<&IndexHint>,
    ) -> DocketResult<DocumentScan<'a>> {
        (**self).scan_raw(doc_type, hint)
    }

    fn update_raw(&self, id: &DocumentId, document: Document) -> DocketResult<Document> {
        (**self).update_raw(id, document)
    }

    fn remove_raw(&self, id: &DocumentId) -> DocketResult<()> {
        (**self).remove_raw(id)
    }

    fn modify_raw(&self, id: &DocumentId, modify: &mut Modify<'_>) -> DocketResult<Document> {
        (**self).modify_raw(id, modify)
    }

    fn supports_conditional_writes(&self) -> bool {
        (**self).supports_conditional_writes()
    }
}

/// Check that an adapter returned a record for the id it was asked about
pub fn ensure_same_id(expected: &DocumentId, document: &Document) -> DocketResult<()> {
    if &document.id == expected {
        Ok(())
    } else {
        Err(DocketError::storage(format!(
            "adapter returned document {} for id {}",
            document.id, expected
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Timestamp;
    use crate::document::Payload;
    use crate::types::Slots;
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    // ====================================================================
    // Minimal mock implementation for behavioral testing
    // ====================================================================

    /// A minimal in-memory adapter relying on the default `modify_raw`.
    struct MockAdapter {
        data: RwLock<BTreeMap<DocumentId, Document>>,
    }

    impl MockAdapter {
        fn new() -> Self {
            MockAdapter {
                data: RwLock::new(BTreeMap::new()),
            }
        }
    }

    impl StorageAdapter for MockAdapter {
        fn insert_raw(&self, document: Document) -> DocketResult<Document> {
            let mut data = self.data.write().unwrap();
            if data.contains_key(&document.id) {
                return Err(DocketError::AlreadyExists {
                    id: document.id.to_string(),
                });
            }
            data.insert(document.id.clone(), document.clone());
            Ok(document)
        }

        fn get_raw(&self, id: &DocumentId) -> DocketResult<Document> {
            let data = self.data.read().unwrap();
            data.get(id).cloned().ok_or_else(|| DocketError::not_found(id))
        }

        fn scan_raw<'a>(
            &'a self,
            doc_type: &str,
            _hint: Option<&IndexHint>,
        ) -> DocketResult<DocumentScan<'a>> {
            let data = self.data.read().unwrap();
            let docs: Vec<DocketResult<Document>> = data
                .values()
                .filter(|d| d.doc_type == doc_type)
                .cloned()
                .map(Ok)
                .collect();
            Ok(Box::new(docs.into_iter()))
        }

        fn update_raw(&self, id: &DocumentId, document: Document) -> DocketResult<Document> {
            let mut data = self.data.write().unwrap();
            match data.get_mut(id) {
                Some(slot) => {
                    *slot = document.clone();
                    Ok(document)
                }
                None => Err(DocketError::not_found(id)),
            }
        }

        fn remove_raw(&self, id: &DocumentId) -> DocketResult<()> {
            let mut data = self.data.write().unwrap();
            data.remove(id)
                .map(|_| ())
                .ok_or_else(|| DocketError::not_found(id))
        }
    }

    fn note(sk1: &str) -> Document {
        Document::new(
            "note",
            "1.0",
            Payload::new(),
            Slots::new().with(SlotKey::Sk1, sk1),
            Timestamp::EPOCH,
        )
    }

    #[test]
    fn default_modify_reads_then_writes() {
        let adapter = MockAdapter::new();
        let doc = adapter.insert_raw(note("a")).unwrap();

        let updated = adapter
            .modify_raw(&doc.id, &mut |mut d| {
                d.sk1 = Some("b".to_string());
                Ok(d)
            })
            .unwrap();

        assert_eq!(updated.sk1.as_deref(), Some("b"));
        assert_eq!(adapter.get_raw(&doc.id).unwrap().sk1.as_deref(), Some("b"));
        assert!(!adapter.supports_conditional_writes());
    }

    #[test]
    fn default_modify_aborts_without_writing() {
        let adapter = MockAdapter::new();
        let doc = adapter.insert_raw(note("a")).unwrap();

        let result = adapter.modify_raw(&doc.id, &mut |_| Err(DocketError::configuration("no")));

        assert!(result.unwrap_err().is_configuration());
        assert_eq!(adapter.get_raw(&doc.id).unwrap().sk1.as_deref(), Some("a"));
    }

    #[test]
    fn default_modify_missing_id_is_not_found() {
        let adapter = MockAdapter::new();
        let err = adapter
            .modify_raw(&DocumentId::new("missing"), &mut |d| Ok(d))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn arc_adapter_forwards() {
        let adapter: std::sync::Arc<dyn StorageAdapter> = std::sync::Arc::new(MockAdapter::new());
        let doc = adapter.insert_raw(note("x")).unwrap();
        assert_eq!(adapter.scan_raw("note", None).unwrap().count(), 1);
        adapter.remove_raw(&doc.id).unwrap();
        assert!(adapter.remove_raw(&doc.id).unwrap_err().is_not_found());
    }

    #[test]
    fn hint_admits_matching_slot_values() {
        let hint = IndexHint::new(SlotKey::Sk1, vec!["a".into(), "c".into()]);
        assert!(hint.admits(&note("a")));
        assert!(!hint.admits(&note("b")));
    }

    #[test]
    fn ensure_same_id_detects_mismatch() {
        let doc = note("a");
        assert!(ensure_same_id(&doc.id, &doc).is_ok());
        assert!(ensure_same_id(&DocumentId::new("other"), &doc).is_err());
    }
}
