use almanac_core::config::CalendarConfig;
use almanac_engine::expand::{horizon_after_days, horizon_after_months};
use almanac_engine::resolve::MarkedDates;
use almanac_engine::{
    Event, EventRecord, Expander, Reminder, ReminderPlan, events_on_day, marked_dates_between,
    parse_records, plan_for_event,
};
use almanac_store::{EventStore, ListFilter, StoreError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::input::{EventPatch, NewEvent, validate};
use crate::error::{ServiceError, ServiceResult};
use crate::notify::NotificationDispatcher;

/// Orchestrates event persistence, calendar views and reminder hand-off.
#[derive(Debug)]
pub struct EventService<S, D> {
    store: S,
    dispatcher: D,
    expander: Expander,
    upcoming_months: u32,
    list_limit: usize,
}

impl<S: EventStore, D: NotificationDispatcher> EventService<S, D> {
    #[must_use]
    pub fn new(store: S, dispatcher: D, calendar: &CalendarConfig) -> Self {
        Self {
            store,
            dispatcher,
            expander: Expander::with_max_occurrences(calendar.max_occurrences),
            upcoming_months: calendar.upcoming_months,
            list_limit: calendar.list_limit,
        }
    }

    /// ## Summary
    /// Validates and persists a new event, then schedules its reminders and
    /// stores the returned handles on the event.
    ///
    /// ## Side Effects
    /// - Writes the event to the store (twice when reminders were requested)
    /// - Hands future reminders to the dispatcher
    ///
    /// ## Errors
    /// `ValidationError` for a blank title or inconsistent dates; store errors
    /// are passed through.
    #[tracing::instrument(skip(self, new), fields(title = %new.title))]
    pub async fn create(&self, new: NewEvent, now: DateTime<Utc>) -> ServiceResult<Event> {
        let offsets = new.reminder_offsets.clone();
        let event = new.into_event(now);
        validate(&event)?;

        let created = self.store.create_event(EventRecord::from(&event)).await?;
        let mut event = Event::try_from(created)?;
        tracing::debug!(event_id = %event.id, "Event created");

        if offsets.is_empty() {
            return Ok(event);
        }

        event.reminders = self.schedule_reminders(&event, &offsets, now).await;
        if let Err(e) = self.store.update_event(EventRecord::from(&event)).await {
            self.cancel_reminders(&event).await;
            return Err(e.into());
        }

        Ok(event)
    }

    /// ## Summary
    /// Applies a partial update.
    ///
    /// Every reminder handle previously stored on the event is cancelled before
    /// the new reminder plan is dispatched. If the write then fails, the new
    /// handles are cancelled and the stored reminders are dispatched again.
    ///
    /// ## Errors
    /// `ValidationError` for an empty patch or an invalid result, `NotFound`
    /// when the event does not exist, `CorruptRecord` when it cannot be read.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: &str,
        patch: EventPatch,
        now: DateTime<Utc>,
    ) -> ServiceResult<Event> {
        if patch.is_empty() {
            return Err(ServiceError::ValidationError(
                "no fields to update".to_string(),
            ));
        }

        let mut event = self.load(id).await?;
        let previous = event.clone();
        let offsets = patch.apply(&mut event);
        validate(&event)?;
        event.updated_at = Some(now);

        self.cancel_reminders(&previous).await;
        event.reminders = self.schedule_reminders(&event, &offsets, now).await;

        match self.store.update_event(EventRecord::from(&event)).await {
            Ok(_) => {
                tracing::debug!(event_id = %event.id, "Event updated");
                Ok(event)
            }
            Err(e) => {
                self.cancel_reminders(&event).await;
                self.restore_reminders(previous, now).await;
                Err(store_error(id, e))
            }
        }
    }

    /// ## Summary
    /// Cancels the event's reminders, then deletes it.
    ///
    /// A stored record that cannot be read as an event is still deleted.
    ///
    /// ## Errors
    /// `NotFound` when the event does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let record = self.load_record(id).await?;
        self.cancel_handles(id, &record.reminders).await;
        self.store
            .delete_event(id)
            .await
            .map_err(|e| store_error(id, e))?;
        tracing::debug!(event_id = %id, "Event deleted");
        Ok(())
    }

    /// ## Errors
    /// `NotFound` when the event does not exist, `CorruptRecord` when it
    /// cannot be read.
    pub async fn get(&self, id: &str) -> ServiceResult<Event> {
        self.load(id).await
    }

    /// ## Summary
    /// Without a range, returns the stored base events. With a range, returns
    /// every occurrence touching its days, sorted by start.
    ///
    /// ## Errors
    /// Store errors are passed through.
    pub async fn list(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> ServiceResult<Vec<Event>> {
        let Some((range_start, range_end)) = range else {
            return self.read_events(None).await;
        };

        let events = self
            .read_events(Some(end_of_day_horizon(range_end.date_naive())))
            .await?;
        Ok(self
            .expander
            .occurrences_in_range(&events, range_start, range_end))
    }

    /// ## Summary
    /// Occurrences touching `day`, sorted by start.
    ///
    /// ## Errors
    /// Store errors are passed through.
    pub async fn day(&self, day: NaiveDate) -> ServiceResult<Vec<Event>> {
        let horizon = end_of_day_horizon(day);
        let events = self.read_events(Some(horizon)).await?;

        let midnight = day.and_time(NaiveTime::MIN).and_utc();
        let occurrences = self
            .expander
            .expand_all_between(&events, midnight, horizon);
        let mut on_day: Vec<Event> = events_on_day(&occurrences, day)
            .into_iter()
            .cloned()
            .collect();
        on_day.sort_by_key(|event| event.start_date);
        Ok(on_day)
    }

    /// ## Summary
    /// Occurrences not finished by `now` that start within the configured
    /// number of months.
    ///
    /// ## Errors
    /// Store errors are passed through.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> ServiceResult<Vec<Event>> {
        let horizon = horizon_after_months(now, self.upcoming_months);
        let events = self.read_events(Some(horizon)).await?;
        Ok(almanac_engine::upcoming(
            &self.expander,
            &events,
            now,
            horizon,
        ))
    }

    /// ## Summary
    /// Marker colors for every day in `range_start..=range_end`.
    ///
    /// ## Errors
    /// Store errors are passed through.
    pub async fn marked_dates(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> ServiceResult<MarkedDates> {
        let occurrences = self.list(Some((range_start, range_end))).await?;
        Ok(marked_dates_between(&occurrences, range_start, range_end))
    }

    async fn load_record(&self, id: &str) -> ServiceResult<EventRecord> {
        self.store
            .get_event(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))
    }

    async fn load(&self, id: &str) -> ServiceResult<Event> {
        let record = self.load_record(id).await?;
        Event::try_from(record).map_err(|e| {
            tracing::warn!(event_id = %id, error = %e, "Stored event is unreadable");
            ServiceError::CorruptRecord {
                id: id.to_string(),
                reason: e.to_string(),
            }
        })
    }

    async fn read_events(&self, starts_by: Option<DateTime<Utc>>) -> ServiceResult<Vec<Event>> {
        let mut filter = ListFilter::default().with_limit(self.list_limit);
        filter.starts_on_or_before = starts_by;
        let records = self.store.list_events(&filter).await?;
        Ok(parse_records(records))
    }

    /// Dispatches the event's reminder plan in fire order. Offsets with a past
    /// fire time, or whose dispatch failed, are kept without a handle.
    async fn schedule_reminders(
        &self,
        event: &Event,
        offsets: &[u32],
        now: DateTime<Utc>,
    ) -> Vec<Reminder> {
        let mut reminders: Vec<Reminder> = Vec::with_capacity(offsets.len());
        for &offset in offsets {
            if !reminders.iter().any(|r| r.minutes_before == offset) {
                reminders.push(Reminder::new(offset));
            }
        }

        let mut planned = event.clone();
        planned.reminders.clone_from(&reminders);
        let plans: Vec<ReminderPlan> = plan_for_event(&planned, now);

        for plan in &plans {
            match self.dispatcher.schedule(event, plan).await {
                Ok(handle) => {
                    if let Some(reminder) = reminders
                        .iter_mut()
                        .find(|r| r.minutes_before == plan.offset_minutes)
                    {
                        reminder.notification_id = Some(handle);
                    }
                }
                Err(e) => tracing::warn!(
                    event_id = %event.id,
                    offset_minutes = plan.offset_minutes,
                    error = %e,
                    "Failed to schedule reminder"
                ),
            }
        }
        reminders
    }

    /// Re-dispatches the reminders of `previous` after a failed update and
    /// stores the fresh handles. If that write fails too, they are cancelled.
    async fn restore_reminders(&self, mut previous: Event, now: DateTime<Utc>) {
        let offsets: Vec<u32> = previous
            .reminders
            .iter()
            .map(|reminder| reminder.minutes_before)
            .collect();
        if offsets.is_empty() {
            return;
        }

        previous.reminders = self.schedule_reminders(&previous, &offsets, now).await;
        if let Err(e) = self.store.update_event(EventRecord::from(&previous)).await {
            tracing::warn!(
                event_id = %previous.id,
                error = %e,
                "Failed to store restored reminders"
            );
            self.cancel_reminders(&previous).await;
        } else {
            tracing::debug!(event_id = %previous.id, "Restored reminders after failed update");
        }
    }

    async fn cancel_reminders(&self, event: &Event) {
        self.cancel_handles(event.id.as_str(), &event.reminders).await;
    }

    async fn cancel_handles(&self, event_id: &str, reminders: &[Reminder]) {
        for handle in reminders
            .iter()
            .filter_map(|reminder| reminder.notification_id.as_deref())
        {
            if let Err(e) = self.dispatcher.cancel(handle).await {
                tracing::warn!(event_id, handle, error = %e, "Failed to cancel reminder");
            }
        }
    }
}

fn store_error(id: &str, error: StoreError) -> ServiceError {
    match error {
        StoreError::NotFound(_) => ServiceError::NotFound(format!("event {id}")),
        other => other.into(),
    }
}

/// Midnight after `day`; the exclusive horizon covering all of `day`.
fn end_of_day_horizon(day: NaiveDate) -> DateTime<Utc> {
    horizon_after_days(day.and_time(NaiveTime::MIN).and_utc(), 1)
}
