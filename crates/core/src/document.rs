//! Document: the canonical stored record
//!
//! A document is an opaque payload plus the metadata the engine needs to
//! find it again: a type discriminator, a schema version, four generic
//! index slots and an optional full-text field.
//!
//! ## Invariants
//!
//! - `id` is assigned at creation and never changes
//! - `doc_type` and `version` never change after creation
//! - `created_at <= updated_at`, and `updated_at` never moves backwards
//! - slot and text values are stored exactly as supplied

use crate::contract::timestamp::{self, Timestamp};
use crate::error::{DocketError, DocketResult};
use crate::types::{DocumentId, SlotKey, Slots};
use serde::{Deserialize, Serialize};

/// Opaque key-ordered payload mapping
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Metadata keys generated by the engine rather than supplied by callers
pub const METADATA_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// A stored record
///
/// Serializes to the persisted record shape
/// `{ id, type, version, data, sk1..sk4, text, createdAt, updatedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Schema discriminator
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Schema version recorded at creation
    pub version: String,
    /// Payload
    pub data: Payload,
    /// Index slot 1
    #[serde(default)]
    pub sk1: Option<String>,
    /// Index slot 2
    #[serde(default)]
    pub sk2: Option<String>,
    /// Index slot 3
    #[serde(default)]
    pub sk3: Option<String>,
    /// Index slot 4
    #[serde(default)]
    pub sk4: Option<String>,
    /// Full-text field
    #[serde(default)]
    pub text: Option<String>,
    /// Creation time
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: Timestamp,
    /// Last successful update
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: Timestamp,
}

impl Document {
    /// Create a new document with a generated id
    ///
    /// `created_at` and `updated_at` are both set to `now`.
    pub fn new(
        doc_type: impl Into<String>,
        version: impl Into<String>,
        data: Payload,
        slots: Slots,
        now: Timestamp,
    ) -> Self {
        Document {
            id: DocumentId::generate(),
            doc_type: doc_type.into(),
            version: version.into(),
            data,
            sk1: slots.sk1,
            sk2: slots.sk2,
            sk3: slots.sk3,
            sk4: slots.sk4,
            text: slots.text,
            created_at: now,
            updated_at: now,
        }
    }

    /// Value of one index slot
    pub fn slot(&self, slot: SlotKey) -> Option<&str> {
        match slot {
            SlotKey::Sk1 => self.sk1.as_deref(),
            SlotKey::Sk2 => self.sk2.as_deref(),
            SlotKey::Sk3 => self.sk3.as_deref(),
            SlotKey::Sk4 => self.sk4.as_deref(),
        }
    }

    /// Mutable access to one index slot
    pub fn slot_mut(&mut self, slot: SlotKey) -> &mut Option<String> {
        match slot {
            SlotKey::Sk1 => &mut self.sk1,
            SlotKey::Sk2 => &mut self.sk2,
            SlotKey::Sk3 => &mut self.sk3,
            SlotKey::Sk4 => &mut self.sk4,
        }
    }

    /// Copy of the slot and text values
    pub fn slots(&self) -> Slots {
        Slots {
            sk1: self.sk1.clone(),
            sk2: self.sk2.clone(),
            sk3: self.sk3.clone(),
            sk4: self.sk4.clone(),
            text: self.text.clone(),
        }
    }

    /// Apply slot overrides verbatim
    ///
    /// Only values present in `overrides` are written; nothing is derived
    /// from the payload.
    pub fn apply_slots(&mut self, overrides: &Slots) {
        for slot in SlotKey::ALL {
            if let Some(value) = overrides.get(slot) {
                *self.slot_mut(slot) = Some(value.to_string());
            }
        }
        if let Some(text) = &overrides.text {
            self.text = Some(text.clone());
        }
    }

    /// Shallow-merge `partial` into the payload
    ///
    /// Keys in `partial` replace existing keys wholesale; nested objects are
    /// not merged recursively.
    pub fn merge(&mut self, partial: Payload) {
        for (key, value) in partial {
            self.data.insert(key, value);
        }
    }

    /// Record a successful update at `now`
    ///
    /// A clock that reads earlier than the previous update (or creation)
    /// leaves `updated_at` where it was.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }
}

/// Require a JSON value to be an object and take its map
pub fn payload_from_value(value: serde_json::Value) -> DocketResult<Payload> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(DocketError::invalid_input(format!(
            "document data must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
