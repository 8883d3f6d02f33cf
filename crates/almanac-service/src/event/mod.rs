//! Event CRUD and calendar views.

mod input;
mod service;

pub use input::{EventPatch, NewEvent};
pub use service::EventService;
