use almanac_core::constants::MONTH_GROUP_FORMAT;
use chrono::{DateTime, Utc};

use crate::expand::Expander;
use crate::model::Event;

/// ## Summary
/// Occurrences that have not finished by `now` and start before `horizon`,
/// sorted by start.
///
/// An occurrence without an end date counts as finished once it has started.
#[must_use]
pub fn upcoming(
    expander: &Expander,
    events: &[Event],
    now: DateTime<Utc>,
    horizon: DateTime<Utc>,
) -> Vec<Event> {
    if horizon <= now {
        return Vec::new();
    }

    let mut occurrences: Vec<Event> = expander
        .expand_all_between(events, now, horizon)
        .into_iter()
        .filter(|occurrence| {
            let finishes = occurrence.end_date.unwrap_or(occurrence.start_date);
            finishes >= now && occurrence.start_date < horizon
        })
        .collect();
    occurrences.sort_by_key(|occurrence| occurrence.start_date);
    occurrences
}

/// ## Summary
/// Groups events under `"Month Year"` labels, preserving input order both
/// between and within groups.
#[must_use]
pub fn group_by_month(events: Vec<Event>) -> Vec<(String, Vec<Event>)> {
    let mut groups: Vec<(String, Vec<Event>)> = Vec::new();
    for event in events {
        let label = event.start_date.format(MONTH_GROUP_FORMAT).to_string();
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, bucket)) => bucket.push(event),
            None => groups.push((label, vec![event])),
        }
    }
    groups
}
