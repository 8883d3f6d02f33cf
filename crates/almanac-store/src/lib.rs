//! Storage collaborator for almanac events.
//!
//! Stores hold events in their wire form ([`EventRecord`]); conversion into
//! engine events happens above this layer so one malformed document cannot
//! fail a listing.

pub mod error;
pub mod store;

pub use almanac_engine::EventRecord;
pub use error::{StoreError, StoreResult};
pub use store::{EventStore, JsonFileStore, ListFilter, MemoryStore, StoreFuture, open_store};
