//! Tests for the calendar views: ranges, days, upcoming and markers.

use chrono::{TimeDelta, Utc};
use salvo::http::StatusCode;
use serde_json::{Value, json};

use almanac_test::component::engine::model::timestamp::format_timestamp;

use super::helpers::*;

async fn get_json(service: &salvo::Service, path: &str) -> Value {
    TestRequest::get(path)
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json()
}

#[test_log::test(tokio::test)]
async fn range_listing_expands_recurring_events() {
    let service = create_test_service();
    let created = create_event(
        &service,
        json!({
            "title": "Stand-up",
            "start_date": "2030-01-31T09:00:00Z",
            "end_date": "2030-01-31T09:15:00Z",
            "recurrence": {"type": "monthly", "interval": 1},
        }),
    )
    .await;

    let base_only = get_json(&service, "/api/events").await;
    assert_eq!(base_only.as_array().unwrap().len(), 1);

    let occurrences = get_json(
        &service,
        "/api/events?start_date=2030-02-01T00:00:00Z&end_date=2030-04-30T23:59:59Z",
    )
    .await;
    let starts: Vec<&str> = occurrences
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["start_date"].as_str().unwrap())
        .collect();
    assert_eq!(
        starts,
        vec![
            "2030-02-28T09:00:00.000Z",
            "2030-03-31T09:00:00.000Z",
            "2030-04-30T09:00:00.000Z",
        ]
    );
    assert_eq!(occurrences[0]["end_date"], "2030-02-28T09:15:00.000Z");
    assert_eq!(occurrences[0]["is_recurring_instance"], true);
    assert_eq!(occurrences[0]["original_event_id"], created["_id"]);
    assert_ne!(occurrences[0]["_id"], occurrences[1]["_id"]);
}

#[test_log::test(tokio::test)]
async fn reversed_range_is_empty() {
    let service = create_test_service();
    create_event(
        &service,
        json!({"title": "Walk", "start_date": "2030-03-01T07:00:00Z",
               "recurrence": {"type": "daily", "interval": 1}}),
    )
    .await;

    let listed = get_json(
        &service,
        "/api/events?start_date=2030-03-10T00:00:00Z&end_date=2030-03-01T00:00:00Z",
    )
    .await;

    assert!(listed.as_array().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn half_open_range_is_rejected() {
    let service = create_test_service();

    let _ = TestRequest::get("/api/events?start_date=2030-03-10T00:00:00Z")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn day_view_covers_every_spanned_day() {
    let service = create_test_service();
    // Monday 2030-03-04 to Wednesday 2030-03-06.
    create_event(
        &service,
        json!({"title": "Offsite", "start_date": "2030-03-04T09:00:00Z",
               "end_date": "2030-03-06T17:00:00Z"}),
    )
    .await;
    create_event(
        &service,
        json!({"title": "Late show", "start_date": "2030-03-07T23:00:00Z",
               "end_date": "2030-03-08T01:00:00Z", "event_type": "social"}),
    )
    .await;

    for (day, titles) in [
        ("2030-03-03", vec![]),
        ("2030-03-04", vec!["Offsite"]),
        ("2030-03-05", vec!["Offsite"]),
        ("2030-03-06", vec!["Offsite"]),
        ("2030-03-07", vec!["Late show"]),
        ("2030-03-08", vec!["Late show"]),
    ] {
        let events = get_json(&service, &format!("/api/events/day/{day}")).await;
        let found: Vec<&str> = events
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(found, titles, "{day}");
    }

    let _ = TestRequest::get("/api/events/day/someday")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn marked_dates_aggregate_colors() {
    let service = create_test_service();
    create_event(
        &service,
        json!({"title": "Period", "start_date": "2030-03-09", "end_date": "2030-03-11",
               "all_day": true, "event_type": "red_days"}),
    )
    .await;
    create_event(
        &service,
        json!({"title": "Meeting", "start_date": "2030-03-10T10:00:00Z",
               "event_type": "meeting"}),
    )
    .await;

    let marked = get_json(
        &service,
        "/api/events/marked?start_date=2030-03-01T00:00:00Z&end_date=2030-03-31T00:00:00Z",
    )
    .await;

    assert_eq!(
        marked,
        json!({
            "2030-03-09": ["#FFB5B5"],
            "2030-03-10": ["#FFB5B5", "#9B7EBD"],
            "2030-03-11": ["#FFB5B5"],
        })
    );

    let _ = TestRequest::get("/api/events/marked")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn upcoming_groups_by_month() {
    let service = create_test_service();
    let soon = Utc::now() + TimeDelta::days(1);
    create_event(
        &service,
        json!({"title": "Water plants", "start_date": format_timestamp(soon),
               "recurrence": {"type": "weekly", "interval": 1}}),
    )
    .await;
    create_event(
        &service,
        json!({"title": "Long ago", "start_date": "2001-01-01T00:00:00Z"}),
    )
    .await;
    create_event(
        &service,
        json!({"title": "Far away", "start_date": format_timestamp(Utc::now() + TimeDelta::days(400))}),
    )
    .await;

    let groups = get_json(&service, "/api/events/upcoming").await;
    let groups = groups.as_array().unwrap();

    assert!(!groups.is_empty());
    let mut previous = None;
    for group in groups {
        assert!(group["month"].is_string());
        for event in group["events"].as_array().unwrap() {
            assert_eq!(event["title"], "Water plants");
            let start = event["start_date"].as_str().unwrap().to_string();
            if let Some(prev) = &previous {
                assert!(start > *prev);
            }
            previous = Some(start);
        }
    }
    let total: usize = groups
        .iter()
        .map(|g| g["events"].as_array().unwrap().len())
        .sum();
    assert!((8..=9).contains(&total), "{total}");
}
