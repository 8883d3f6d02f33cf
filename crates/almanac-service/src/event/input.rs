use almanac_core::types::EventType;
use almanac_engine::{Event, EventId, Recurrence};
use chrono::{DateTime, Utc};

use crate::error::{ServiceError, ServiceResult};

/// Fields supplied when creating an event. Identity and timestamps are
/// assigned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub event_type: EventType,
    pub recurrence: Option<Recurrence>,
    /// Requested reminder offsets in minutes before the start.
    pub reminder_offsets: Vec<u32>,
}

impl NewEvent {
    #[must_use]
    pub fn new(title: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start_date,
            ..Self::default()
        }
    }

    pub(super) fn into_event(self, now: DateTime<Utc>) -> Event {
        Event {
            id: EventId::generate(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            all_day: self.all_day,
            event_type: self.event_type,
            recurrence: self.recurrence,
            reminders: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
            original_event_id: None,
        }
    }
}

/// Partial update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub event_type: Option<EventType>,
    pub recurrence: Option<Recurrence>,
    pub reminder_offsets: Option<Vec<u32>>,
}

impl EventPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch. Returns the reminder offsets the event should carry
    /// afterwards.
    pub(super) fn apply(self, event: &mut Event) -> Vec<u32> {
        if let Some(title) = self.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            event.description = description.trim().to_string();
        }
        if let Some(start_date) = self.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            event.end_date = Some(end_date);
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(recurrence) = self.recurrence {
            event.recurrence = Some(recurrence);
        }

        self.reminder_offsets.unwrap_or_else(|| {
            event
                .reminders
                .iter()
                .map(|reminder| reminder.minutes_before)
                .collect()
        })
    }
}

/// ## Summary
/// Checks what the engine cannot recover from on its own.
///
/// ## Errors
/// `ValidationError` when the title is blank, the end precedes the start, or a
/// recurrence interval is not positive.
pub(super) fn validate(event: &Event) -> ServiceResult<()> {
    if event.title.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "title must not be empty".to_string(),
        ));
    }

    if event.end_date.is_some_and(|end| end < event.start_date) {
        return Err(ServiceError::ValidationError(
            "end_date must not precede start_date".to_string(),
        ));
    }

    if event
        .frequency()
        .interval()
        .is_some_and(|interval| interval < 1)
    {
        return Err(ServiceError::ValidationError(
            "recurrence interval must be at least 1".to_string(),
        ));
    }

    Ok(())
}
