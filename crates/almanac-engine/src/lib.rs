//! Occurrence engine for the almanac calendar.
//!
//! Everything in this crate is a pure function of its inputs: recurrence
//! expansion, day-granularity range resolution, and reminder timing.

pub mod error;
pub mod expand;
pub mod model;
pub mod remind;
pub mod resolve;

pub use expand::{Expander, expand, expand_all, occurrences_in_range};
pub use model::{Event, EventId, EventRecord, Frequency, Recurrence, RecurrenceRecord, Reminder};
pub use remind::{ReminderPlan, plan_for_event, reminder_anchor, schedule_times};
pub use resolve::{
    events_intersecting, events_on_day, group_by_month, marked_dates, marked_dates_between,
    parse_records, upcoming,
};
