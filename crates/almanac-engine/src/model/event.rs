use almanac_core::types::EventType;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::recurrence::{Frequency, Recurrence};

/// Opaque event identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reminder offset, plus the dispatcher handle once it has been scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub minutes_before: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
}

impl Reminder {
    #[must_use]
    pub const fn new(minutes_before: u32) -> Self {
        Self {
            minutes_before,
            notification_id: None,
        }
    }
}

/// A calendar event. Base events are persisted; occurrences generated from them
/// carry the base id in `original_event_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub event_type: EventType,
    pub recurrence: Option<Recurrence>,
    pub reminders: Vec<Reminder>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub original_event_id: Option<EventId>,
}

impl Event {
    /// ## Summary
    /// Creates a single-instance event with no end, reminders, or recurrence.
    #[must_use]
    pub fn new(id: impl Into<EventId>, title: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start_date,
            end_date: None,
            all_day: false,
            event_type: EventType::default(),
            recurrence: None,
            reminders: Vec::new(),
            created_at: None,
            updated_at: None,
            original_event_id: None,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    #[must_use]
    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    #[must_use]
    pub fn with_reminders(mut self, minutes: impl IntoIterator<Item = u32>) -> Self {
        self.reminders = minutes.into_iter().map(Reminder::new).collect();
        self
    }

    #[must_use]
    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.recurrence.map(|rule| rule.frequency).unwrap_or_default()
    }

    #[must_use]
    pub const fn is_recurring_instance(&self) -> bool {
        self.original_event_id.is_some()
    }

    /// Length of the event when it has an end date.
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        self.end_date
            .map(|end| end.signed_duration_since(self.start_date))
    }

    #[must_use]
    pub fn start_day(&self) -> NaiveDate {
        self.start_date.date_naive()
    }

    /// Last calendar day the event touches. Never earlier than the start day.
    #[must_use]
    pub fn end_day(&self) -> NaiveDate {
        self.end_date
            .map_or(self.start_day(), |end| end.date_naive().max(self.start_day()))
    }

    /// Midnight at the start of the event's first day.
    #[must_use]
    pub fn start_of_start_day(&self) -> DateTime<Utc> {
        self.start_day().and_time(NaiveTime::MIN).and_utc()
    }

    /// ## Summary
    /// Materialises a repetition of this event starting at `start`.
    ///
    /// The copy gets a fresh id, keeps every other field, and preserves the base
    /// duration exactly when the base has an end date.
    #[must_use]
    pub fn occurrence_at(&self, start: DateTime<Utc>) -> Self {
        let end_date = self
            .duration()
            .and_then(|duration| start.checked_add_signed(duration));
        Self {
            id: EventId::generate(),
            start_date: start,
            end_date,
            original_event_id: Some(self.id.clone()),
            ..self.clone()
        }
    }
}
