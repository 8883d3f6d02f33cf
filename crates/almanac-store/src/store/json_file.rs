use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use almanac_engine::EventRecord;
use tokio::sync::RwLock;

use super::collection::Collection;
use super::{EventStore, ListFilter, StoreFuture};
use crate::error::StoreResult;

/// Store persisted as a single JSON array on disk.
///
/// The whole collection is rewritten after every mutation. A mutation whose
/// write fails leaves the in-memory state untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: RwLock<Collection>,
}

impl JsonFileStore {
    /// ## Summary
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// ## Errors
    /// Returns an error if the file exists but cannot be read or is not a JSON
    /// array of event records.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice::<Vec<EventRecord>>(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Event file missing, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = records.len(), "Loaded event file");

        Ok(Self {
            path,
            inner: RwLock::new(Collection::from_records(records)),
        })
    }

    async fn flush(&self, collection: &Collection) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(collection.records())?;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        tracing::trace!(path = %self.path.display(), "Flushed event file");
        Ok(())
    }

    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Collection) -> StoreResult<T> + Send,
    ) -> StoreResult<T> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let output = op(&mut next)?;
        self.flush(&next).await?;
        *guard = next;
        Ok(output)
    }
}

impl EventStore for JsonFileStore {
    fn list_events<'a>(&'a self, filter: &'a ListFilter) -> StoreFuture<'a, Vec<EventRecord>> {
        Box::pin(async move { Ok(self.inner.read().await.list(filter)) })
    }

    fn get_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<EventRecord>> {
        Box::pin(async move { Ok(self.inner.read().await.get(id)) })
    }

    fn create_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord> {
        Box::pin(self.mutate(move |collection| collection.insert(record)))
    }

    fn update_event<'a>(&'a self, record: EventRecord) -> StoreFuture<'a, EventRecord> {
        Box::pin(self.mutate(move |collection| collection.replace(record)))
    }

    fn delete_event<'a>(&'a self, id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(self.mutate(move |collection| collection.remove(id)))
    }
}
