use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_timeslots_lists_only_free_individual_slots() {
    let ctx = TestContext::new().await;
    let morning = ctx.individual_slot(9).await;
    let taken = ctx.individual_slot(11).await;
    ctx.group_slot(5).await;

    ctx.server
        .post("/api/bookings")
        .json(&json!({
            "serviceId": ctx.service.id,
            "trainerId": ctx.trainer.id,
            "timeSlotId": taken.id,
            "date": "2025-10-01",
        }))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .get("/api/timeslots")
        .add_query_param("service_id", ctx.service.id)
        .add_query_param("trainerId", ctx.trainer.id)
        .add_query_param("date", "2025-10-01")
        .await;

    response.assert_status_ok();
    let slots = response.json::<Vec<Value>>();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["id"], morning.id);
    assert_eq!(slots[0]["times"], "09:00:00");
}

#[tokio::test]
async fn test_timeslots_requires_service_id() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/timeslots").await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_group_classes_include_class_and_trainer() {
    let ctx = TestContext::new().await;
    let open = ctx.group_slot(4).await;
    ctx.group_slot(0).await;

    let response = ctx
        .server
        .get("/api/group-classes")
        .add_query_param("date", "2025-10-01")
        .await;

    response.assert_status_ok();
    let classes = response.json::<Vec<Value>>();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["GroupClass"]["name"], "Йога критического выравнивания");
    assert_eq!(classes[0]["Trainer"]["name"], "Мастер-тренер");
    assert_eq!(classes[0]["TimeSlot"]["id"], open.id);
    assert_eq!(classes[0]["TimeSlot"]["available_spots"], 4);
}

#[tokio::test]
async fn test_group_classes_on_empty_day() {
    let ctx = TestContext::new().await;
    ctx.group_slot(4).await;

    let response = ctx
        .server
        .get("/api/group-classes")
        .add_query_param("date", "2025-10-02")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}
