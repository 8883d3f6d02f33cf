//! Tests for event CRUD.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use salvo::http::StatusCode;
use serde_json::json;

use almanac_test::component::engine::model::timestamp::format_timestamp;
use almanac_test::component::store::JsonFileStore;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn create_returns_stored_document() {
    let service = create_test_service();

    let created = create_event(
        &service,
        json!({
            "title": "  Dentist  ",
            "start_date": "2030-04-03T09:00:00Z",
            "end_date": "2030-04-03T10:00:00Z",
            "event_type": "appointment",
        }),
    )
    .await;

    assert!(created["_id"].is_string());
    assert_eq!(created["title"], "Dentist");
    assert_eq!(created["start_date"], "2030-04-03T09:00:00.000Z");
    assert_eq!(created["color"], "#A8D5E2");
    assert_eq!(created["icon"], "calendar");
    assert_eq!(created["is_recurring_instance"], false);
    assert!(created["created_at"].is_string());

    let id = created["_id"].as_str().unwrap();
    let fetched = TestRequest::get(&event_path(id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, created);
}

#[test_log::test(tokio::test)]
async fn create_rejects_blank_title() {
    let service = create_test_service();

    let body = TestRequest::post("/api/events")
        .json(json!({"title": "   ", "start_date": "2030-04-03T09:00:00Z"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["retryable"], false);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[test_log::test(tokio::test)]
async fn create_rejects_unreadable_dates() {
    let service = create_test_service();

    let _ = TestRequest::post("/api/events")
        .json(json!({"title": "Lunch", "start_date": "tomorrow at noon"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let _ = TestRequest::post("/api/events")
        .json(json!({"title": "Lunch"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn create_schedules_future_reminders() {
    let service = create_test_service();
    let start = Utc::now() + TimeDelta::days(2);

    let created = create_event(
        &service,
        json!({
            "title": "Flight",
            "start_date": format_timestamp(start),
            "reminders": [{"minutes_before": 60}, {"minutes_before": 5760}],
        }),
    )
    .await;

    let reminders = created["reminders"].as_array().unwrap();
    assert_eq!(reminders.len(), 2);
    assert_eq!(reminders[0]["minutes_before"], 60);
    assert!(reminders[0]["notification_id"].is_string());
    // Four days before a start two days out is already past.
    assert!(reminders[1].get("notification_id").is_none());
}

#[test_log::test(tokio::test)]
async fn update_applies_partial_changes() {
    let service = create_test_service();
    let created = create_event(
        &service,
        json!({
            "title": "Book club",
            "description": "Chapter 3",
            "start_date": "2030-05-01T18:00:00Z",
        }),
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let updated = TestRequest::put(&event_path(id))
        .json(json!({"title": "Book club (moved)", "start_date": "2030-05-02T18:00:00Z"}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(updated["title"], "Book club (moved)");
    assert_eq!(updated["description"], "Chapter 3");
    assert_eq!(updated["start_date"], "2030-05-02T18:00:00.000Z");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[test_log::test(tokio::test)]
async fn update_rejects_empty_body_and_unknown_id() {
    let service = create_test_service();
    let created = create_event(
        &service,
        json!({"title": "Gym", "start_date": "2030-05-01T07:00:00Z"}),
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let _ = TestRequest::put(&event_path(id))
        .json(json!({}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body = TestRequest::put("/api/events/does-not-exist")
        .json(json!({"title": "Gym"}))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["retryable"], false);
}

#[test_log::test(tokio::test)]
async fn delete_removes_event() {
    let service = create_test_service();
    let created = create_event(
        &service,
        json!({"title": "Party", "start_date": "2030-06-07T20:00:00Z"}),
    )
    .await;
    let path = event_path(created["_id"].as_str().unwrap());

    let body = TestRequest::delete(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["message"], "Event deleted successfully");

    let _ = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let _ = TestRequest::delete(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn json_file_store_persists_across_services() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let first = create_service_with_store(
        Arc::new(JsonFileStore::open(&path).await.unwrap()),
        test_settings(""),
    );
    let created = create_event(
        &first,
        json!({"title": "Anniversary", "start_date": "2030-09-12", "all_day": true,
               "recurrence": {"type": "yearly", "interval": 1}}),
    )
    .await;

    let second = create_service_with_store(
        Arc::new(JsonFileStore::open(&path).await.unwrap()),
        test_settings(""),
    );
    let listed = TestRequest::get("/api/events")
        .send(&second)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["_id"], created["_id"]);
    assert_eq!(listed[0]["recurrence"]["type"], "yearly");
}

#[test_log::test(tokio::test)]
async fn unreadable_stored_event_is_reported_and_deletable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(
        &path,
        r#"[{"_id": "broken", "title": "Broken", "start_date": "next tuesday"}]"#,
    )
    .unwrap();
    let service = create_service_with_store(
        Arc::new(JsonFileStore::open(&path).await.unwrap()),
        test_settings(""),
    );

    let listed = TestRequest::get("/api/events")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(listed.as_array().unwrap().is_empty());

    let body = TestRequest::get(&event_path("broken"))
        .send(&service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();
    assert_eq!(body["retryable"], false);

    let _ = TestRequest::delete(&event_path("broken"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    let _ = TestRequest::get(&event_path("broken"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
