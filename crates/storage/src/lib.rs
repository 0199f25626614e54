//! Storage layer for Docket
//!
//! This crate implements the in-memory storage backend with:
//! - MemoryStore: DashMap of encoded records behind the `StorageAdapter` trait
//! - SlotIndex: type and slot indices used to honor scan hints
//! - codec: MessagePack record encoding
//!
//! # Concurrency
//!
//! - Lock-free point reads via DashMap
//! - One index write lock serializes mutations, which makes `modify_raw`
//!   an atomic read-modify-write
//! - FxHashMap for O(1) index lookups

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod index;
pub mod memory;

pub use index::SlotIndex;
pub use memory::{MemoryStore, ScanGuard};
