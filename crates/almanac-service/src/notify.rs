//! Seam between the service and whatever actually delivers reminders.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use almanac_engine::{Event, ReminderPlan};

use crate::error::ServiceResult;

pub type DispatchFuture<'a, T> = Pin<Box<dyn Future<Output = ServiceResult<T>> + Send + 'a>>;

/// Delivers reminders at their planned fire time.
///
/// The service cancels every handle it holds for an event before rescheduling
/// or deleting that event. Implementations report delivery failures as
/// [`ServiceError::DispatchError`]; the service logs them and keeps the reminder
/// without a handle.
///
/// [`ServiceError::DispatchError`]: crate::error::ServiceError::DispatchError
pub trait NotificationDispatcher: Send + Sync {
    /// Schedules one reminder and returns a handle that can cancel it.
    fn schedule<'a>(&'a self, event: &'a Event, plan: &'a ReminderPlan)
    -> DispatchFuture<'a, String>;

    /// Cancels a previously scheduled reminder. Unknown handles are not an error.
    fn cancel<'a>(&'a self, handle: &'a str) -> DispatchFuture<'a, ()>;
}

impl<T: NotificationDispatcher + ?Sized> NotificationDispatcher for Arc<T> {
    fn schedule<'a>(
        &'a self,
        event: &'a Event,
        plan: &'a ReminderPlan,
    ) -> DispatchFuture<'a, String> {
        (**self).schedule(event, plan)
    }

    fn cancel<'a>(&'a self, handle: &'a str) -> DispatchFuture<'a, ()> {
        (**self).cancel(handle)
    }
}

/// Dispatcher that only records reminders in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
    fn schedule<'a>(
        &'a self,
        event: &'a Event,
        plan: &'a ReminderPlan,
    ) -> DispatchFuture<'a, String> {
        Box::pin(async move {
            let handle = uuid::Uuid::new_v4().to_string();
            tracing::info!(
                event_id = %event.id,
                title = %event.title,
                offset_minutes = plan.offset_minutes,
                fire_at = %plan.fire_at,
                handle = %handle,
                "Reminder scheduled"
            );
            Ok(handle)
        })
    }

    fn cancel<'a>(&'a self, handle: &'a str) -> DispatchFuture<'a, ()> {
        Box::pin(async move {
            tracing::info!(handle, "Reminder cancelled");
            Ok(())
        })
    }
}
