//! Reminder timing.
//!
//! Only computes when reminders should fire. Delivery, and cancelling previously
//! handed-out fire times before an event is edited or deleted, belong to the
//! caller.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::model::Event;

/// One reminder ready for hand-off to a notification dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderPlan {
    pub offset_minutes: u32,
    pub fire_at: DateTime<Utc>,
}

/// ## Summary
/// Computes fire times `occurrence_start - offset` for each distinct offset,
/// dropping any that are not strictly after `now`.
///
/// Output is sorted by ascending fire time.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn schedule_times(
    occurrence_start: DateTime<Utc>,
    offsets: impl IntoIterator<Item = u32>,
    now: DateTime<Utc>,
) -> Vec<ReminderPlan> {
    let offsets: BTreeSet<u32> = offsets.into_iter().collect();

    // Larger offsets fire earlier.
    offsets
        .into_iter()
        .rev()
        .filter_map(|offset_minutes| {
            let fire_at =
                occurrence_start.checked_sub_signed(TimeDelta::minutes(i64::from(offset_minutes)))?;
            (fire_at > now).then_some(ReminderPlan {
                offset_minutes,
                fire_at,
            })
        })
        .collect()
}

/// The instant reminder offsets are measured from: the start, or midnight of
/// the start day for all-day events.
#[must_use]
pub fn reminder_anchor(event: &Event) -> DateTime<Utc> {
    if event.all_day {
        event.start_of_start_day()
    } else {
        event.start_date
    }
}

/// ## Summary
/// Plans the event's own reminders relative to its anchor.
#[must_use]
pub fn plan_for_event(event: &Event, now: DateTime<Utc>) -> Vec<ReminderPlan> {
    schedule_times(
        reminder_anchor(event),
        event.reminders.iter().map(|reminder| reminder.minutes_before),
        now,
    )
}
