//! Recurrence expansion.
//!
//! Turns a base event into the ordered list of its concrete occurrences up to a
//! horizon. The first element is always the base event itself.

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::model::{Event, Recurrence};
use crate::resolve::intersects_days;

/// ## Summary
/// Default cap on occurrences produced from one base event.
///
/// Bounds work on very long horizons; normal termination comes from the horizon.
pub const DEFAULT_MAX_OCCURRENCES: usize = 10_000;

/// Expands recurring events with a fixed occurrence cap.
#[derive(Debug, Clone, Copy)]
pub struct Expander {
    max_occurrences: usize,
}

impl Default for Expander {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl Expander {
    #[must_use]
    pub fn with_max_occurrences(max_occurrences: usize) -> Self {
        Self {
            max_occurrences: max_occurrences.max(1),
        }
    }

    /// ## Summary
    /// Expands `base` into occurrences whose start is strictly before `until`.
    ///
    /// Non-recurring events yield `[base]`. Every step is measured from the base
    /// start; expansion stops as soon as a step fails to move strictly forward,
    /// passes the rule's own end date, or reaches the horizon.
    ///
    /// ## Side Effects
    /// None - pure function.
    #[must_use]
    pub fn expand(&self, base: &Event, until: DateTime<Utc>) -> Vec<Event> {
        let mut occurrences = vec![base.clone()];
        if let Some(rule) = base.recurrence.filter(|rule| rule.is_recurring()) {
            self.walk(base, rule, 1, None, until, &mut occurrences);
        }
        occurrences
    }

    /// ## Summary
    /// Occurrences of `base` that finish at or after `from` and start before
    /// `until`, the base event included when it qualifies.
    ///
    /// The walk starts a few steps before `from` rather than at the anchor, and
    /// the occurrence cap only counts occurrences inside the window, so events
    /// anchored far in the past still resolve.
    #[must_use]
    pub fn expand_between(
        &self,
        base: &Event,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Vec<Event> {
        let mut occurrences = Vec::new();
        if base.start_date < until && finishes_at(base, base.start_date) >= from {
            occurrences.push(base.clone());
        }

        let Some(rule) = base.recurrence.filter(|rule| rule.is_recurring()) else {
            return occurrences;
        };

        let lead = base
            .duration()
            .unwrap_or(TimeDelta::zero())
            .max(TimeDelta::zero());
        let target = from.checked_sub_signed(lead).unwrap_or(base.start_date);
        let first_step = rule
            .frequency
            .step_before(base.start_date, target)
            .saturating_add(1);
        tracing::trace!(event_id = %base.id, first_step, "Skipping ahead to window");

        self.walk(base, rule, first_step, Some(from), until, &mut occurrences);
        occurrences
    }

    /// Steps `base` forward from `first_step`, pushing repetitions that start
    /// before `until` and, when `from` is set, finish at or after it.
    fn walk(
        &self,
        base: &Event,
        rule: Recurrence,
        first_step: i64,
        from: Option<DateTime<Utc>>,
        until: DateTime<Utc>,
        occurrences: &mut Vec<Event>,
    ) {
        let anchor = base.start_date;
        let mut step = first_step.saturating_sub(1);
        let Some(mut current) = rule.frequency.nth(anchor, step) else {
            return;
        };

        while current < until {
            step += 1;
            let Some(next) = rule.frequency.nth(anchor, step) else {
                tracing::trace!(event_id = %base.id, step, "Recurrence step not representable");
                break;
            };

            if next <= current {
                tracing::warn!(
                    event_id = %base.id,
                    frequency = rule.frequency.name(),
                    interval = ?rule.frequency.interval(),
                    "Recurrence does not advance, keeping base event only"
                );
                break;
            }
            current = next;

            if rule.end_date.is_some_and(|end| current > end) {
                tracing::trace!(event_id = %base.id, "Recurrence end date reached");
                break;
            }
            if current >= until {
                break;
            }
            if from.is_some_and(|from| finishes_at(base, current) < from) {
                continue;
            }

            if occurrences.len() >= self.max_occurrences {
                tracing::warn!(
                    event_id = %base.id,
                    max_occurrences = self.max_occurrences,
                    "Occurrence cap reached, truncating expansion"
                );
                break;
            }
            tracing::trace!(event_id = %base.id, start = %current, "Emitting occurrence");
            occurrences.push(base.occurrence_at(current));
        }
    }

    /// Expands every event in `events` to the same horizon.
    #[must_use]
    pub fn expand_all(&self, events: &[Event], until: DateTime<Utc>) -> Vec<Event> {
        events
            .iter()
            .flat_map(|event| self.expand(event, until))
            .collect()
    }

    /// See [`Expander::expand_between`].
    #[must_use]
    pub fn expand_all_between(
        &self,
        events: &[Event],
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Vec<Event> {
        events
            .iter()
            .flat_map(|event| self.expand_between(event, from, until))
            .collect()
    }

    /// ## Summary
    /// Returns every occurrence touching the calendar days from `range_start` to
    /// `range_end` (inclusive), sorted by start.
    ///
    /// A reversed window yields nothing.
    #[must_use]
    pub fn occurrences_in_range(
        &self,
        events: &[Event],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Vec<Event> {
        if range_end < range_start {
            return Vec::new();
        }

        let first_day = range_start.date_naive();
        let last_day = range_end.date_naive();
        let from = first_day.and_time(NaiveTime::MIN).and_utc();
        let horizon = last_day
            .succ_opt()
            .map_or(DateTime::<Utc>::MAX_UTC, |day| {
                day.and_time(NaiveTime::MIN).and_utc()
            });

        let mut occurrences: Vec<Event> = self
            .expand_all_between(events, from, horizon)
            .into_iter()
            .filter(|occurrence| intersects_days(occurrence, first_day, last_day))
            .collect();
        occurrences.sort_by_key(|occurrence| occurrence.start_date);
        occurrences
    }
}

/// Latest instant of a repetition of `base` starting at `start`.
fn finishes_at(base: &Event, start: DateTime<Utc>) -> DateTime<Utc> {
    base.duration()
        .and_then(|duration| start.checked_add_signed(duration))
        .map_or(start, |end| end.max(start))
}

/// Expands `base` with the default occurrence cap. See [`Expander::expand`].
#[must_use]
pub fn expand(base: &Event, until: DateTime<Utc>) -> Vec<Event> {
    Expander::default().expand(base, until)
}

/// See [`Expander::expand_all`].
#[must_use]
pub fn expand_all(events: &[Event], until: DateTime<Utc>) -> Vec<Event> {
    Expander::default().expand_all(events, until)
}

/// See [`Expander::occurrences_in_range`].
#[must_use]
pub fn occurrences_in_range(
    events: &[Event],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Vec<Event> {
    Expander::default().occurrences_in_range(events, range_start, range_end)
}

/// Horizon that covers `months` calendar months after `from`.
#[must_use]
pub fn horizon_after_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    from.checked_add_months(chrono::Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Horizon that covers `days` days after `from`.
#[must_use]
pub fn horizon_after_days(from: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
