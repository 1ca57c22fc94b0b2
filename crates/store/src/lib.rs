//! Persistence substrate: durable entity collections, one per kind.
//!
//! The store is an injected dependency with explicit load/save operations per
//! entity kind — never a hidden global. `save_*` replaces the whole
//! collection; that replacement is the atomicity boundary the ledger relies
//! on.

pub mod entity_store;
pub mod json_file;
pub mod memory;
pub mod seed;

pub use entity_store::{EntityKind, EntityStore, StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use seed::seed_if_empty;
