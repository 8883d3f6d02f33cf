use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use almanac_core::config::{StorageBackend, StorageConfig};
use almanac_engine::EventRecord;
use chrono::{DateTime, Utc};

use crate::error::StoreResult;

mod collection;
mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Prefilter applied by the store before any occurrence expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only records whose `start_date` is at or before this instant.
    pub starts_on_or_before: Option<DateTime<Utc>>,
    /// Maximum number of records returned.
    pub limit: Option<usize>,
}

impl ListFilter {
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn starting_by(mut self, instant: DateTime<Utc>) -> Self {
        self.starts_on_or_before = Some(instant);
        self
    }
}

/// CRUD access to persisted base events.
pub trait EventStore: Send + Sync {
    /// Records matching `filter`, in insertion order.
    fn list_events<'a>(&'a self, filter: &'a ListFilter) -> StoreFuture<'a, Vec<EventRecord>>;

    fn get_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<EventRecord>>;

    /// ## Summary
    /// Persists a new record, assigning a fresh identifier when it has none.
    ///
    /// ## Errors
    /// `AlreadyExists` when the record carries an identifier already in use.
    fn create_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord>;

    /// ## Summary
    /// Replaces the stored record with the same identifier.
    ///
    /// ## Errors
    /// `NotFound` when no record has that identifier.
    fn update_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord>;

    /// ## Errors
    /// `NotFound` when no record has that identifier.
    fn delete_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()>;
}

impl<T: EventStore + ?Sized> EventStore for Arc<T> {
    fn list_events<'a>(&'a self, filter: &'a ListFilter) -> StoreFuture<'a, Vec<EventRecord>> {
        (**self).list_events(filter)
    }

    fn get_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<EventRecord>> {
        (**self).get_event(id)
    }

    fn create_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord> {
        (**self).create_event(record)
    }

    fn update_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord> {
        (**self).update_event(record)
    }

    fn delete_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()> {
        (**self).delete_event(id)
    }
}

/// ## Summary
/// Opens the store selected by the storage configuration.
///
/// ## Errors
/// Returns an error if the JSON file exists but cannot be read or parsed.
pub async fn open_store(config: &StorageConfig) -> StoreResult<Arc<dyn EventStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory event store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::JsonFile => {
            tracing::info!(path = %config.path, "Using JSON file event store");
            Ok(Arc::new(JsonFileStore::open(&config.path).await?))
        }
    }
}
