//! Tests for the fixed API endpoints.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn api_root_reports_name() {
    let service = create_test_service();

    let body = TestRequest::get("/api")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["message"], "Almanac Calendar API");
}

#[test_log::test(tokio::test)]
async fn healthcheck_returns_ok() {
    let service = create_test_service();

    let response = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/healthcheck"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(response.body_string(), "OK");
}

#[test_log::test(tokio::test)]
async fn unknown_route_is_not_found() {
    let service = create_test_service();

    let _ = TestRequest::get("/api/nothing/here")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
