use almanac_engine::EventRecord;
use almanac_engine::model::timestamp::parse_timestamp;

use super::ListFilter;
use crate::error::{StoreError, StoreResult};

/// Insertion-ordered set of records shared by the store implementations.
#[derive(Debug, Clone, Default)]
pub(super) struct Collection {
    records: Vec<EventRecord>,
}

impl Collection {
    pub(super) fn from_records(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    pub(super) fn records(&self) -> &[EventRecord] {
        &self.records
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.id.as_deref() == Some(id))
    }

    /// Records whose start cannot be read are passed through; callers skip them.
    fn matches(record: &EventRecord, filter: &ListFilter) -> bool {
        let Some(bound) = filter.starts_on_or_before else {
            return true;
        };
        parse_timestamp("start_date", &record.start_date).map_or(true, |start| start <= bound)
    }

    pub(super) fn list(&self, filter: &ListFilter) -> Vec<EventRecord> {
        self.records
            .iter()
            .filter(|record| Self::matches(record, filter))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub(super) fn get(&self, id: &str) -> Option<EventRecord> {
        self.position(id).map(|index| self.records[index].clone())
    }

    pub(super) fn insert(&mut self, mut record: EventRecord) -> StoreResult<EventRecord> {
        let id = match record.id.take().filter(|id| !id.trim().is_empty()) {
            Some(id) if self.position(&id).is_some() => return Err(StoreError::AlreadyExists(id)),
            Some(id) => id,
            None => uuid::Uuid::new_v4().to_string(),
        };
        record.id = Some(id);
        self.records.push(record.clone());
        Ok(record)
    }

    pub(super) fn replace(&mut self, record: EventRecord) -> StoreResult<EventRecord> {
        let id = record.id.clone().unwrap_or_default();
        let index = self.position(&id).ok_or(StoreError::NotFound(id))?;
        self.records[index] = record.clone();
        Ok(record)
    }

    pub(super) fn remove(&mut self, id: &str) -> StoreResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.records.remove(index);
        Ok(())
    }
}
