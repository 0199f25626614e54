//! Core types for Docket
//!
//! This module defines the foundational types:
//! - DocumentId: opaque, globally unique record identifier
//! - SlotKey: one of the four generic secondary-index slots
//! - Slots: values for `sk1..sk4` plus the full-text field

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a stored document
///
/// Generated ids are UUID v4 text, but the type is opaque: adapters that
/// mint their own identifiers (`OID-ABCD-1234`) can wrap any string.
/// Ordering is plain string order; the query engine relies on it as the
/// final tiebreaker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a new random DocumentId using UUID v4
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Generic secondary-index slot
///
/// The engine never interprets slot contents; their meaning is assigned
/// per schema by an index encoder. Declaration order (`Sk1 < Sk2 < Sk3 <
/// Sk4`) is the order the planner considers slots in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    /// First slot
    Sk1,
    /// Second slot
    Sk2,
    /// Third slot
    Sk3,
    /// Fourth slot
    Sk4,
}

impl SlotKey {
    /// All slots in planner order
    pub const ALL: [SlotKey; 4] = [SlotKey::Sk1, SlotKey::Sk2, SlotKey::Sk3, SlotKey::Sk4];

    /// Wire name (`"sk1"` .. `"sk4"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::Sk1 => "sk1",
            SlotKey::Sk2 => "sk2",
            SlotKey::Sk3 => "sk3",
            SlotKey::Sk4 => "sk4",
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sk1" => Ok(SlotKey::Sk1),
            "sk2" => Ok(SlotKey::Sk2),
            "sk3" => Ok(SlotKey::Sk3),
            "sk4" => Ok(SlotKey::Sk4),
            other => Err(format!("unknown index slot '{}'", other)),
        }
    }
}

/// Index slot values and full-text field
///
/// Produced by an index encoder or passed verbatim as caller overrides.
/// A `None` field means "not provided". Keys other than `sk1`..`sk4` and
/// `text` are rejected on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slots {
    /// Value for `sk1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sk1: Option<String>,
    /// Value for `sk2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sk2: Option<String>,
    /// Value for `sk3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sk3: Option<String>,
    /// Value for `sk4`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sk4: Option<String>,
    /// Full-text field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Slots {
    /// No values set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one slot
    pub fn with(mut self, slot: SlotKey, value: impl Into<String>) -> Self {
        *self.slot_mut(slot) = Some(value.into());
        self
    }

    /// Builder-style setter for the text field
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Value of one slot
    pub fn get(&self, slot: SlotKey) -> Option<&str> {
        match slot {
            SlotKey::Sk1 => self.sk1.as_deref(),
            SlotKey::Sk2 => self.sk2.as_deref(),
            SlotKey::Sk3 => self.sk3.as_deref(),
            SlotKey::Sk4 => self.sk4.as_deref(),
        }
    }

    /// Mutable access to one slot
    pub fn slot_mut(&mut self, slot: SlotKey) -> &mut Option<String> {
        match slot {
            SlotKey::Sk1 => &mut self.sk1,
            SlotKey::Sk2 => &mut self.sk2,
            SlotKey::Sk3 => &mut self.sk3,
            SlotKey::Sk4 => &mut self.sk4,
        }
    }

    /// True when no slot and no text is set
    pub fn is_empty(&self) -> bool {
        SlotKey::ALL.iter().all(|s| self.get(*s).is_none()) && self.text.is_none()
    }
}
