//! Indexed keys usable in `where` and `orderBy`

use docket_core::{DocketError, Document, SlotKey, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A key the engine can filter and sort on
///
/// `id`, `text`, `type` and payload paths are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IndexKey {
    /// One of `sk1..sk4`
    Slot(SlotKey),
    /// `createdAt`
    CreatedAt,
    /// `updatedAt`
    UpdatedAt,
    /// `version`
    Version,
}

impl IndexKey {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKey::Slot(slot) => slot.as_str(),
            IndexKey::CreatedAt => "createdAt",
            IndexKey::UpdatedAt => "updatedAt",
            IndexKey::Version => "version",
        }
    }

    /// Timestamp keys compare chronologically and take RFC 3339 operands
    pub fn is_timestamp(&self) -> bool {
        matches!(self, IndexKey::CreatedAt | IndexKey::UpdatedAt)
    }

    /// Read this key from a document
    pub fn read<'a>(&self, doc: &'a Document) -> KeyValue<'a> {
        match self {
            IndexKey::Slot(slot) => KeyValue::Text(doc.slot(*slot)),
            IndexKey::Version => KeyValue::Text(Some(doc.version.as_str())),
            IndexKey::CreatedAt => KeyValue::Time(doc.created_at),
            IndexKey::UpdatedAt => KeyValue::Time(doc.updated_at),
        }
    }
}

/// A document's value under an [`IndexKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyValue<'a> {
    /// Slot or version text; `None` for an unset slot
    Text(Option<&'a str>),
    /// Metadata timestamp
    Time(Timestamp),
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKey {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(IndexKey::CreatedAt),
            "updatedAt" => Ok(IndexKey::UpdatedAt),
            "version" => Ok(IndexKey::Version),
            other => other.parse::<SlotKey>().map(IndexKey::Slot).map_err(|_| {
                DocketError::configuration(format!("'{}' is not an indexed key", other))
            }),
        }
    }
}

impl TryFrom<String> for IndexKey {
    type Error = DocketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IndexKey> for String {
    fn from(key: IndexKey) -> Self {
        key.as_str().to_string()
    }
}
