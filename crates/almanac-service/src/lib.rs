//! Event CRUD orchestration: validation, persistence through an
//! [`almanac_store::EventStore`], calendar views built on the occurrence
//! engine, and reminder hand-off to a [`NotificationDispatcher`].

pub mod error;
pub mod event;
pub mod notify;

pub use error::{ServiceError, ServiceResult};
pub use event::{EventPatch, EventService, NewEvent};
pub use notify::{NotificationDispatcher, TracingDispatcher};
