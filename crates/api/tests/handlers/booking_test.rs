use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use yoga_core::errors::{BookingError, TIME_TAKEN_DETAIL};
use yoga_db::mock::{MockCatalogRepo, MockSlotRepo};

use crate::test_utils::{TestContext, mock_server};

fn individual_body(ctx: &TestContext, slot_id: i32) -> Value {
    json!({
        "serviceId": ctx.service.id,
        "trainerId": ctx.trainer.id,
        "timeSlotId": slot_id,
        "date": "2025-10-01",
    })
}

fn group_body(ctx: &TestContext, slot_id: i32, name: &str) -> Value {
    json!({
        "classId": ctx.group_class.id,
        "timeSlotId": slot_id,
        "date": "2025-10-01",
        "name": name,
        "phone": "+79990001122",
        "email": "client@example.com",
    })
}

#[tokio::test]
async fn test_latest_details_on_empty_store() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/booking-details").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "error": "No booking found" }));
}

#[tokio::test]
async fn test_individual_booking_marks_slot_unavailable() {
    let ctx = TestContext::new().await;
    let slot = ctx.individual_slot(10).await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&individual_body(&ctx, slot.id))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["booking_id"].is_i64());
    assert!(!ctx.slot(slot.id).await.available);
}

#[tokio::test]
async fn test_rebooking_same_slot_is_rejected() {
    let ctx = TestContext::new().await;
    let slot = ctx.individual_slot(10).await;

    ctx.server
        .post("/api/bookings")
        .json(&individual_body(&ctx, slot.id))
        .await
        .assert_status_ok();
    let response = ctx
        .server
        .post("/api/bookings")
        .json(&individual_body(&ctx, slot.id))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "detail": TIME_TAKEN_DETAIL }));
    assert_eq!(ctx.repo.bookings().await.len(), 1);
}

#[tokio::test]
async fn test_last_group_spot_is_taken_once() {
    let ctx = TestContext::new().await;
    let slot = ctx.group_slot(1).await;

    ctx.server
        .post("/api/bookings")
        .json(&group_body(&ctx, slot.id, "Анна"))
        .await
        .assert_status_ok();
    let response = ctx
        .server
        .post("/api/bookings")
        .json(&group_body(&ctx, slot.id, "Мария"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "detail": TIME_TAKEN_DETAIL }));

    let slot = ctx.slot(slot.id).await;
    assert_eq!(slot.available_spots, 0);
    assert!(!slot.available);
}

#[tokio::test]
async fn test_unknown_slot_looks_like_a_taken_slot() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&individual_body(&ctx, 4242))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "detail": TIME_TAKEN_DETAIL }));
}

#[rstest]
#[case::empty_body(json!({}), "Either serviceId and trainerId or classId is required")]
#[case::mixed_shapes(
    json!({ "serviceId": 1, "trainerId": 1, "classId": 1, "timeSlotId": 1, "date": "2025-10-01" }),
    "classId cannot be combined"
)]
#[case::missing_slot(json!({ "serviceId": 1, "trainerId": 1, "date": "2025-10-01" }), "timeSlotId is required")]
#[case::group_without_phone(
    json!({ "classId": 1, "timeSlotId": 1, "date": "2025-10-01", "name": "Анна" }),
    "phone is required"
)]
#[tokio::test]
async fn test_malformed_booking_is_validation_error(#[case] body: Value, #[case] expected: &str) {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/api/bookings").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.contains(expected), "unexpected detail: {}", detail);
    assert!(ctx.repo.bookings().await.is_empty());
}

#[tokio::test]
async fn test_wrongly_typed_field_is_validation_error() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({ "serviceId": "one", "trainerId": 1, "timeSlotId": 1, "date": "2025-10-01" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn test_booking_details_after_group_booking() {
    let ctx = TestContext::new().await;
    let slot = ctx.group_slot(3).await;

    let booking_id = ctx
        .server
        .post("/api/bookings")
        .json(&group_body(&ctx, slot.id, "Анна"))
        .await
        .json::<Value>()["booking_id"]
        .clone();

    let latest = ctx.server.get("/api/booking-details").await.json::<Value>();
    assert_eq!(latest["bookingId"], booking_id);
    assert_eq!(latest["className"], "Йога критического выравнивания");
    assert_eq!(latest["trainerName"], "Мастер-тренер");
    assert_eq!(latest["serviceName"], Value::Null);
    assert_eq!(latest["date"], "2025-10-01");
    assert_eq!(latest["time"], "19:30:00");

    let by_id = ctx
        .server
        .get(&format!("/api/bookings/{}", booking_id))
        .await;
    by_id.assert_status_ok();
    assert_eq!(by_id.json::<Value>(), latest);
}

#[tokio::test]
async fn test_unknown_booking_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/bookings/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn test_persistence_failure_is_internal_error() {
    let mut slots = MockSlotRepo::new();
    slots
        .expect_get_slot()
        .returning(|_| Err(BookingError::Database(eyre::eyre!("connection refused"))));
    let (server, state) = mock_server(slots, MockCatalogRepo::new());

    let response = server
        .post("/api/bookings")
        .json(&json!({ "serviceId": 1, "trainerId": 1, "timeSlotId": 1, "date": "2025-10-01" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(!detail.contains("connection refused"));
    assert_eq!(state.metrics.bookings.attempts("individual", "database_error"), 1);
}
