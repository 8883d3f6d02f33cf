use almanac_engine::EventRecord;
use tokio::sync::RwLock;

use super::collection::Collection;
use super::{EventStore, ListFilter, StoreFuture};

/// Process-local store. Contents are lost on shutdown.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing records, kept as given.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = EventRecord>) -> Self {
        Self {
            inner: RwLock::new(Collection::from_records(records.into_iter().collect())),
        }
    }
}

impl EventStore for MemoryStore {
    fn list_events<'a>(&'a self, filter: &'a ListFilter) -> StoreFuture<'a, Vec<EventRecord>> {
        Box::pin(async move { Ok(self.inner.read().await.list(filter)) })
    }

    fn get_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<EventRecord>> {
        Box::pin(async move { Ok(self.inner.read().await.get(id)) })
    }

    fn create_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord> {
        Box::pin(async move { self.inner.write().await.insert(record) })
    }

    fn update_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord> {
        Box::pin(async move { self.inner.write().await.replace(record) })
    }

    fn delete_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.inner.write().await.remove(id) })
    }
}
