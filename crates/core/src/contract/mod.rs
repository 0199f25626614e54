//! Contract types shared by every layer
//!
//! - `timestamp`: microsecond timestamps and their RFC 3339 text form

pub mod timestamp;

pub use timestamp::Timestamp;
