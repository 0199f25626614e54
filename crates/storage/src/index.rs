//! Secondary indices for narrowing scans
//!
//! - type index: maps a document type to every id of that type, so a
//!   type-scoped scan never touches other types
//! - slot index: maps `(type, slot, value)` to ids, so an equality
//!   [`IndexHint`] turns into a handful of set lookups
//!
//! Id sets are `BTreeSet`s so candidate lists come out in a stable order.

use docket_core::{Document, DocumentId, IndexHint, SlotKey};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

type SlotEntry = (String, SlotKey, String);

/// Type and slot indices over the stored documents
#[derive(Debug, Default)]
pub struct SlotIndex {
    by_type: FxHashMap<String, BTreeSet<DocumentId>>,
    by_slot: FxHashMap<SlotEntry, BTreeSet<DocumentId>>,
}

impl SlotIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document under its type and each set slot
    pub fn insert(&mut self, doc: &Document) {
        self.by_type
            .entry(doc.doc_type.clone())
            .or_default()
            .insert(doc.id.clone());
        for slot in SlotKey::ALL {
            if let Some(value) = doc.slot(slot) {
                self.by_slot
                    .entry((doc.doc_type.clone(), slot, value.to_string()))
                    .or_default()
                    .insert(doc.id.clone());
            }
        }
    }

    /// Drop a document from every index entry it appears in
    ///
    /// Entries whose set becomes empty are removed so the maps do not
    /// accumulate empty sets.
    pub fn remove(&mut self, doc: &Document) {
        if let Some(ids) = self.by_type.get_mut(&doc.doc_type) {
            ids.remove(&doc.id);
            if ids.is_empty() {
                self.by_type.remove(&doc.doc_type);
            }
        }
        for slot in SlotKey::ALL {
            if let Some(value) = doc.slot(slot) {
                let entry = (doc.doc_type.clone(), slot, value.to_string());
                if let Some(ids) = self.by_slot.get_mut(&entry) {
                    ids.remove(&doc.id);
                    if ids.is_empty() {
                        self.by_slot.remove(&entry);
                    }
                }
            }
        }
    }

    /// Re-index a document whose slots may have changed
    pub fn replace(&mut self, old: &Document, new: &Document) {
        self.remove(old);
        self.insert(new);
    }

    /// Candidate ids for a type-scoped scan
    ///
    /// With a hint, only ids whose hinted slot holds one of the hinted
    /// values are returned.
    pub fn candidates(&self, doc_type: &str, hint: Option<&IndexHint>) -> Vec<DocumentId> {
        match hint {
            None => self
                .by_type
                .get(doc_type)
                .map(|ids| ids.iter().cloned().collect())
                .unwrap_or_default(),
            Some(hint) => {
                let mut ids = BTreeSet::new();
                for value in &hint.values {
                    let entry = (doc_type.to_string(), hint.slot, value.clone());
                    if let Some(set) = self.by_slot.get(&entry) {
                        ids.extend(set.iter().cloned());
                    }
                }
                ids.into_iter().collect()
            }
        }
    }

    /// Number of ids of a type
    pub fn type_len(&self, doc_type: &str) -> usize {
        self.by_type.get(doc_type).map_or(0, BTreeSet::len)
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
