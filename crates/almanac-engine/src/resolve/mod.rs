//! Day-granularity resolution of events against calendar views.
//!
//! All comparisons strip the time of day: an event touches every calendar day
//! from its start day through its end day inclusive.

mod marked;
mod upcoming;

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{Event, EventRecord};

pub use marked::{MarkedDates, marked_dates, marked_dates_between};
pub use upcoming::{group_by_month, upcoming};

/// Whether `event` touches any calendar day in `first..=last`.
#[must_use]
pub fn intersects_days(event: &Event, first: NaiveDate, last: NaiveDate) -> bool {
    event.start_day() <= last && event.end_day() >= first
}

/// ## Summary
/// Returns the events whose day span overlaps the days of
/// `range_start..=range_end`, in input order.
///
/// A reversed window (`range_end < range_start`) yields nothing.
#[must_use]
pub fn events_intersecting(
    events: &[Event],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Vec<&Event> {
    if range_end < range_start {
        return Vec::new();
    }
    let first = range_start.date_naive();
    let last = range_end.date_naive();

    events
        .iter()
        .filter(|event| intersects_days(event, first, last))
        .collect()
}

/// Returns the events touching `day`, in input order.
#[must_use]
pub fn events_on_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| intersects_days(event, day, day))
        .collect()
}

/// ## Summary
/// Converts stored records into events, dropping the ones that cannot be read.
///
/// A malformed record is logged and skipped so the rest of the calendar still
/// resolves.
pub fn parse_records(records: impl IntoIterator<Item = EventRecord>) -> Vec<Event> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match Event::try_from(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(event_id = ?id, error = %e, "Skipping malformed event record");
                    None
                }
            }
        })
        .collect()
}
