//! Request and response bodies for the events API.

use almanac_core::constants::DAY_KEY_FORMAT;
use almanac_core::types::EventType;
use almanac_engine::model::timestamp::{parse_optional_timestamp, parse_timestamp};
use almanac_engine::{Event, EventRecord, RecurrenceRecord, Reminder};
use almanac_service::{EventPatch, NewEvent};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// ## Summary
/// Create and update request payload.
///
/// Field names follow the stored document layout. Unknown fields (`color`,
/// `icon`, `_id`, ...) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct EventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub all_day: Option<bool>,
    pub event_type: Option<EventType>,
    pub recurrence: Option<RecurrenceRecord>,
    pub reminders: Option<Vec<Reminder>>,
}

fn offsets(reminders: Vec<Reminder>) -> Vec<u32> {
    reminders
        .into_iter()
        .map(|reminder| reminder.minutes_before)
        .collect()
}

impl EventInput {
    /// ## Errors
    /// Returns an error if `start_date` is missing or any timestamp is unreadable.
    pub fn into_new_event(self) -> AppResult<NewEvent> {
        let start_date = self
            .start_date
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("start_date is required".to_string()))?;

        Ok(NewEvent {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            start_date: parse_timestamp("start_date", start_date)?,
            end_date: parse_optional_timestamp("end_date", self.end_date.as_deref())?,
            all_day: self.all_day.unwrap_or(false),
            event_type: self.event_type.unwrap_or_default(),
            recurrence: self
                .recurrence
                .as_ref()
                .map(|rule| rule.to_recurrence(None)),
            reminder_offsets: self.reminders.map(offsets).unwrap_or_default(),
        })
    }

    /// ## Errors
    /// Returns an error if any supplied timestamp is unreadable.
    pub fn into_patch(self, id: &str) -> AppResult<EventPatch> {
        Ok(EventPatch {
            title: self.title,
            description: self.description,
            start_date: parse_optional_timestamp("start_date", self.start_date.as_deref())?,
            end_date: parse_optional_timestamp("end_date", self.end_date.as_deref())?,
            all_day: self.all_day,
            event_type: self.event_type,
            recurrence: self.recurrence.as_ref().map(|rule| rule.to_recurrence(Some(id))),
            reminder_offsets: self.reminders.map(offsets),
        })
    }
}

/// Upcoming occurrences sharing a `"Month Year"` label.
#[derive(Debug, Serialize)]
pub struct MonthGroup {
    pub month: String,
    pub events: Vec<EventRecord>,
}

#[must_use]
pub fn to_records(events: &[Event]) -> Vec<EventRecord> {
    events.iter().map(EventRecord::from).collect()
}

/// Accepts either `yyyy-MM-dd` or a full timestamp.
///
/// ## Errors
/// Returns an error if `raw` is neither.
pub fn parse_day(raw: &str) -> AppResult<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, DAY_KEY_FORMAT) {
        return Ok(day);
    }
    Ok(parse_timestamp("date", raw)?.date_naive())
}

/// ## Errors
/// Returns an error if only one bound is supplied or either is unreadable.
pub fn parse_range(
    start: Option<String>,
    end: Option<String>,
) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some((
            parse_timestamp("start_date", &start)?,
            parse_timestamp("end_date", &end)?,
        ))),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "start_date and end_date must be given together".to_string(),
        )),
    }
}
