use std::collections::BTreeMap;

use almanac_core::constants::DAY_KEY_FORMAT;
use chrono::{DateTime, NaiveDate, Utc};

use crate::model::Event;

/// Marker colors per calendar day, keyed by `yyyy-MM-dd`.
pub type MarkedDates = BTreeMap<String, Vec<String>>;

fn mark_days(marked: &mut MarkedDates, event: &Event, first: NaiveDate, last: NaiveDate) {
    let color = event.event_type.color();
    for day in first.iter_days().take_while(|day| *day <= last) {
        marked
            .entry(day.format(DAY_KEY_FORMAT).to_string())
            .or_default()
            .push(color.to_string());
    }
}

/// ## Summary
/// Aggregates one marker per event for every calendar day the event touches.
///
/// Colors on a day appear in input order.
#[must_use]
pub fn marked_dates(events: &[Event]) -> MarkedDates {
    let mut marked = MarkedDates::new();
    for event in events {
        mark_days(&mut marked, event, event.start_day(), event.end_day());
    }
    marked
}

/// ## Summary
/// Same as [`marked_dates`], but only for days inside `range_start..=range_end`.
///
/// Long spans are clipped to the window. A reversed window yields nothing.
#[must_use]
pub fn marked_dates_between(
    events: &[Event],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> MarkedDates {
    let mut marked = MarkedDates::new();
    if range_end < range_start {
        return marked;
    }
    let window_first = range_start.date_naive();
    let window_last = range_end.date_naive();

    for event in events {
        let first = event.start_day().max(window_first);
        let last = event.end_day().min(window_last);
        if first <= last {
            mark_days(&mut marked, event, first, last);
        }
    }
    marked
}
