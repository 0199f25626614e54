//! Physical record codec
//!
//! Records are held as MessagePack bytes rather than live structs, the same
//! way a key-value backend would hold them. Field names are kept in the
//! encoding (`to_vec_named`) so records written by an older layout still
//! decode when optional fields are added.

use docket_core::{DocketError, DocketResult, Document};

/// Encode a document for storage
pub fn encode(doc: &Document) -> DocketResult<Vec<u8>> {
    rmp_serde::to_vec_named(doc).map_err(|e| DocketError::serialization(e.to_string()))
}

/// Decode a stored document
pub fn decode(bytes: &[u8]) -> DocketResult<Document> {
    rmp_serde::from_slice(bytes).map_err(|e| DocketError::serialization(e.to_string()))
}
