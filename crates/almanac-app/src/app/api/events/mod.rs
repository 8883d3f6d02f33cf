//! Event CRUD and calendar view endpoints.

mod payload;

use almanac_engine::{EventRecord, group_by_month};
use almanac_engine::resolve::MarkedDates;
use chrono::Utc;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;

use super::{EVENTS_ROUTE_COMPONENT, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::service_handler::get_service_from_depot;
use payload::{EventInput, MonthGroup, parse_day, parse_range, to_records};

fn respond<T: Serialize + Send>(res: &mut Response, result: AppResult<T>) {
    match result {
        Ok(body) => res.render(Json(body)),
        Err(e) => e.render(res),
    }
}

fn path_id(req: &Request) -> AppResult<String> {
    req.param::<String>("id")
        .ok_or_else(|| AppError::BadRequest("Missing event id".to_string()))
}

async fn read_body(req: &mut Request) -> AppResult<EventInput> {
    req.parse_json::<EventInput>().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse event body");
        AppError::BadRequest("Invalid request body".to_string())
    })
}

/// ## Summary
/// GET /api/events - base events, or the expanded occurrences touching
/// `start_date..=end_date` when both are given.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn list_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let range = parse_range(req.query("start_date"), req.query("end_date"))?;
        tracing::debug!(?range, "Listing events");
        let events = get_service_from_depot(depot)?.list(range).await?;
        Ok::<_, AppError>(to_records(&events))
    }
    .await;
    respond(res, result);
}

/// ## Summary
/// POST /api/events - validate, persist and schedule reminders.
///
/// ## Errors
/// Returns HTTP 400 for an unreadable body, a blank title, or bad timestamps.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let new = read_body(req).await?.into_new_event()?;
        let event = get_service_from_depot(depot)?
            .create(new, Utc::now())
            .await?;
        Ok::<_, AppError>(EventRecord::from(&event))
    }
    .await;
    respond(res, result);
}

/// ## Summary
/// GET /api/events/upcoming - occurrences from now through the configured
/// horizon, grouped by month.
#[handler]
#[tracing::instrument(skip_all)]
async fn upcoming_events(depot: &mut Depot, res: &mut Response) {
    let result = async {
        let events = get_service_from_depot(depot)?.upcoming(Utc::now()).await?;
        Ok::<_, AppError>(
            group_by_month(events)
                .into_iter()
                .map(|(month, events)| MonthGroup {
                    month,
                    events: to_records(&events),
                })
                .collect::<Vec<_>>(),
        )
    }
    .await;
    respond(res, result);
}

/// ## Summary
/// GET /api/events/marked - marker colors per day for the calendar grid.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn marked_dates(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (start, end) = parse_range(req.query("start_date"), req.query("end_date"))?
            .ok_or_else(|| {
                AppError::BadRequest("start_date and end_date are required".to_string())
            })?;
        let marked: MarkedDates = get_service_from_depot(depot)?
            .marked_dates(start, end)
            .await?;
        Ok::<_, AppError>(marked)
    }
    .await;
    respond(res, result);
}

/// ## Summary
/// GET /api/events/day/{date} - occurrences touching one calendar day.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn day_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let raw = req
            .param::<String>("date")
            .ok_or_else(|| AppError::BadRequest("Missing date".to_string()))?;
        let day = parse_day(&raw)?;
        let events = get_service_from_depot(depot)?.day(day).await?;
        Ok::<_, AppError>(to_records(&events))
    }
    .await;
    respond(res, result);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = path_id(req)?;
        let event = get_service_from_depot(depot)?.get(&id).await?;
        Ok::<_, AppError>(EventRecord::from(&event))
    }
    .await;
    respond(res, result);
}

/// ## Summary
/// PUT /api/events/{id} - partial update; reminders are rescheduled.
///
/// ## Errors
/// Returns HTTP 400 for an empty or invalid body, 404 for an unknown id.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = path_id(req)?;
        let patch = read_body(req).await?.into_patch(&id)?;
        let event = get_service_from_depot(depot)?
            .update(&id, patch, Utc::now())
            .await?;
        Ok::<_, AppError>(EventRecord::from(&event))
    }
    .await;
    respond(res, result);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = path_id(req)?;
        get_service_from_depot(depot)?.delete(&id).await?;
        Ok::<_, AppError>(MessageResponse {
            message: "Event deleted successfully".to_string(),
        })
    }
    .await;
    respond(res, result);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(list_events)
        .post(create_event)
        .push(Router::with_path("upcoming").get(upcoming_events))
        .push(Router::with_path("marked").get(marked_dates))
        .push(Router::with_path("day/{date}").get(day_events))
        .push(
            Router::with_path("{id}")
                .get(get_event)
                .put(update_event)
                .delete(delete_event),
        )
}
