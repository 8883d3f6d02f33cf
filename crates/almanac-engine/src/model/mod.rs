mod event;
mod record;
mod recurrence;
pub mod timestamp;

pub use event::{Event, EventId, Reminder};
pub use record::{EventRecord, RecurrenceRecord};
pub use recurrence::{Frequency, Recurrence};
