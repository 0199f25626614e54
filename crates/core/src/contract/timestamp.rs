//! Microsecond-precision timestamp type
//!
//! Documents carry `createdAt`/`updatedAt` and jobs carry `runAfter`. All
//! three are stored as microseconds since Unix epoch and rendered as
//! fixed-width RFC 3339 UTC text (`2024-05-01T12:00:00.000000Z`).
//!
//! The fixed width matters: job `runAfter` values are written into a string
//! index slot, and range filters over slots compare lexicographically. With
//! a constant layout, lexicographic order equals chronological order.
//!
//! ```
//! use docket_core::Timestamp;
//!
//! let ts = Timestamp::from_secs(0);
//! assert_eq!(ts.to_rfc3339(), "1970-01-01T00:00:00.000000Z");
//! assert_eq!(Timestamp::parse_rfc3339("1970-01-01T00:00:00Z"), Some(ts));
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Microsecond-precision timestamp
///
/// ## Invariants
///
/// - Never negative; instants before the epoch are not representable
/// - Comparable and orderable by instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Last instant with fixed-width RFC 3339 text (9999-12-31T23:59:59.999999Z)
    pub const MAX_FIXED_WIDTH: Timestamp = Timestamp(253_402_300_799_999_999);

    /// Create a timestamp for the current moment
    ///
    /// Returns epoch if the system clock is before Unix epoch.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_micros() as u64)
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    /// Microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Whether [`to_rfc3339`](Self::to_rfc3339) yields the fixed-width layout
    ///
    /// Only such timestamps may be written into a slot, where order is
    /// lexicographic.
    #[inline]
    pub fn has_fixed_width_text(&self) -> bool {
        *self <= Self::MAX_FIXED_WIDTH
    }

    /// Add a duration, saturating at the maximum representable instant
    pub fn saturating_add(&self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Subtract a duration, saturating at epoch
    pub fn saturating_sub(&self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_sub(duration.as_micros() as u64))
    }

    /// Render as fixed-width RFC 3339 UTC text with microseconds
    pub fn to_rfc3339(&self) -> String {
        let secs = (self.0 / 1_000_000) as i64;
        let nanos = ((self.0 % 1_000_000) * 1_000) as u32;
        match Utc.timestamp_opt(secs, nanos).single() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Micros, true),
            // Beyond chrono's range (year 262143); keep the raw value visible.
            None => format!("+{}us", self.0),
        }
    }

    /// Parse RFC 3339 text
    ///
    /// Offsets are normalized to UTC. Text without an offset
    /// (`1970-01-01T00:00:00`) is read as UTC. Instants before the epoch
    /// yield `None`.
    pub fn parse_rfc3339(text: &str) -> Option<Self> {
        let utc = match DateTime::parse_from_rfc3339(text) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => {
                let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
                Utc.from_utc_datetime(&naive)
            }
        };
        let micros = utc.timestamp_micros();
        u64::try_from(micros).ok().map(Timestamp)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Serde adapter writing a [`Timestamp`] as RFC 3339 text
///
/// Used on the persisted record shape so `createdAt`/`updatedAt` read the
/// same in every wire format.
pub mod rfc3339 {
    use super::Timestamp;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// Serialize as RFC 3339 text
    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    /// Deserialize from RFC 3339 text
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse_rfc3339(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid RFC 3339 timestamp: {}", text)))
    }
}
