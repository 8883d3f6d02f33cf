//! Stored/wire representation of events.
//!
//! Field names follow the document store layout (`_id`, `start_date`, ...).
//! Timestamps stay as strings here so that one malformed record can be
//! reported and skipped instead of failing a whole batch.

use almanac_core::types::EventType;
use serde::{Deserialize, Serialize};

use super::event::{Event, EventId, Reminder};
use super::recurrence::{Frequency, Recurrence};
use super::timestamp::{format_timestamp, parse_optional_timestamp, parse_timestamp};
use crate::error::{EngineError, EngineResult};

const fn default_interval() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_interval")]
    pub interval: i64,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRecord>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_recurring_instance: bool,
    #[serde(default)]
    pub original_event_id: Option<String>,
}

impl RecurrenceRecord {
    /// ## Summary
    /// Converts a stored rule into a typed recurrence.
    ///
    /// A malformed rule (unknown type or unreadable end date) degrades to a
    /// non-repeating rule; it never fails. `event_id` is `None` for an event
    /// that has not been stored yet.
    #[must_use]
    pub fn to_recurrence(&self, event_id: Option<&str>) -> Recurrence {
        let Some(frequency) = Frequency::from_name(&self.kind, self.interval) else {
            tracing::warn!(
                event_id,
                recurrence_type = %self.kind,
                "Unknown recurrence type, treating event as non-repeating"
            );
            return Recurrence::default();
        };

        match parse_optional_timestamp("recurrence.end_date", self.end_date.as_deref()) {
            Ok(end_date) => Recurrence {
                frequency,
                end_date,
            },
            Err(e) => {
                tracing::warn!(
                    event_id,
                    error = %e,
                    "Unreadable recurrence end date, treating event as non-repeating"
                );
                Recurrence::default()
            }
        }
    }
}

impl From<&Recurrence> for RecurrenceRecord {
    fn from(value: &Recurrence) -> Self {
        Self {
            kind: value.frequency.name().to_string(),
            interval: value.frequency.interval().unwrap_or(1),
            end_date: value.end_date.map(format_timestamp),
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = EngineError;

    fn try_from(record: EventRecord) -> EngineResult<Self> {
        let id = record.id.ok_or(EngineError::MissingId)?;
        let start_date = parse_timestamp("start_date", &record.start_date)?;
        let end_date = parse_optional_timestamp("end_date", record.end_date.as_deref())?;
        let created_at = parse_optional_timestamp("created_at", record.created_at.as_deref())?;
        let updated_at = parse_optional_timestamp("updated_at", record.updated_at.as_deref())?;
        let recurrence = record
            .recurrence
            .as_ref()
            .map(|rule| rule.to_recurrence(Some(&id)));

        Ok(Self {
            id: EventId::from(id),
            title: record.title,
            description: record.description.unwrap_or_default(),
            start_date,
            end_date,
            all_day: record.all_day,
            event_type: record.event_type,
            recurrence,
            reminders: record.reminders,
            created_at,
            updated_at,
            original_event_id: record.original_event_id.map(EventId::from),
        })
    }
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        let style = event.event_type.style();
        Self {
            id: Some(event.id.to_string()),
            title: event.title.clone(),
            description: Some(event.description.clone()),
            start_date: format_timestamp(event.start_date),
            end_date: event.end_date.map(format_timestamp),
            all_day: event.all_day,
            event_type: event.event_type,
            color: Some(style.color.to_string()),
            icon: Some(style.icon.to_string()),
            recurrence: event.recurrence.as_ref().map(RecurrenceRecord::from),
            reminders: event.reminders.clone(),
            created_at: event.created_at.map(format_timestamp),
            updated_at: event.updated_at.map(format_timestamp),
            is_recurring_instance: event.is_recurring_instance(),
            original_event_id: event.original_event_id.as_ref().map(ToString::to_string),
        }
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}
