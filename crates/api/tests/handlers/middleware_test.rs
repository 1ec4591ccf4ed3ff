use axum::http::StatusCode;
use serde_json::json;
use yoga_api::middleware::error_handling::{AppError, PublicBookingError, map_error};
use axum::response::IntoResponse;
use yoga_core::errors::{BookingError, EntityKind};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(BookingError::NotFound("Booking 1 not found".to_string()));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let response = map_error(BookingError::validation("date is required"));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_entity_not_found() {
    let response = map_error(BookingError::entity_not_found(EntityKind::Trainer, "X"));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_database() {
    let response = AppError(BookingError::Database(eyre::eyre!("Database error"))).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_public_error_collapses_conflicts() {
    for err in [
        BookingError::SlotNotFound(1),
        BookingError::SlotUnavailable(1),
        BookingError::entity_not_found(EntityKind::Service, 3),
    ] {
        let response = PublicBookingError(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = PublicBookingError(BookingError::Database(eyre::eyre!("down"))).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_metrics_endpoint_reflects_bookings() {
    let ctx = TestContext::new().await;
    let slot = ctx.individual_slot(10).await;
    let body = json!({
        "serviceId": ctx.service.id,
        "trainerId": ctx.trainer.id,
        "timeSlotId": slot.id,
        "date": "2025-10-01",
    });
    ctx.server.post("/api/bookings").json(&body).await.assert_status_ok();
    ctx.server
        .post("/api/bookings")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = ctx.server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains(
        r#"booking_attempts_total{kind="individual",outcome="success",service="booking-test"} 1"#
    ));
    assert!(text.contains(
        r#"booking_attempts_total{kind="individual",outcome="slot_unavailable",service="booking-test"} 1"#
    ));
    assert!(text.contains(
        r#"http_requests_total{method="POST",endpoint="/api/bookings",status="400",service="booking-test"} 1"#
    ));
}

#[tokio::test]
async fn test_request_metrics_use_route_template() {
    let ctx = TestContext::new().await;

    ctx.server.get("/api/bookings/41").await;
    ctx.server.get("/api/bookings/42").await;

    assert_eq!(
        ctx.state
            .metrics
            .http
            .requests("GET", "/api/bookings/:id", 404),
        2
    );
}
