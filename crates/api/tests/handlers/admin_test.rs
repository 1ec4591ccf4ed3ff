use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use yoga_core::{
    errors::SLOT_NOT_FOUND_DETAIL, models::time_slot::SlotFilter, repository::SlotRepository,
};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_add_individual_time_slot() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/admin/time/add")
        .json(&json!({
            "trainer_name": "Мастер-тренер",
            "service_name": "Хатха йога",
            "date": "2025-10-01",
            "time": "10:00",
            "status": true,
            "available_spots": 0,
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Временной слот успешно добавлен");
    assert_eq!(body["time_slot"]["trainer_id"], ctx.trainer.id);
    assert_eq!(body["time_slot"]["service_id"], ctx.service.id);
    assert_eq!(body["time_slot"]["dates"], "2025-10-01");
    assert_eq!(body["time_slot"]["times"], "10:00:00");
    assert_eq!(body["time_slot"]["available"], true);
}

#[tokio::test]
async fn test_add_group_time_slot_then_fetch_it() {
    let ctx = TestContext::new().await;

    let created = ctx
        .server
        .post("/api/admin/time/add")
        .json(&json!({
            "trainer_name": "Мастер-тренер",
            "group_class_name": "Йога критического выравнивания",
            "date": "2025-10-01",
            "time": "19:30",
            "available_spots": 5,
        }))
        .await
        .json::<Value>();
    let id = created["time_slot"]["id"].as_i64().unwrap();

    let response = ctx.server.get(&format!("/api/admin/time/{}", id)).await;

    response.assert_status_ok();
    let slot = response.json::<Value>();
    assert_eq!(slot["group_class_id"], ctx.group_class.id);
    assert_eq!(slot["available_spots"], 5);
    assert_eq!(slot["available"], true);
}

#[rstest]
#[case::trainer(
    json!({ "trainer_name": "Nonexistent Trainer", "service_name": "Хатха йога", "date": "2025-10-01", "time": "10:00" }),
    "Тренер 'Nonexistent Trainer' не найден"
)]
#[case::service(
    json!({ "trainer_name": "Мастер-тренер", "service_name": "Несуществующая Услуга", "date": "2025-10-01", "time": "10:00" }),
    "Услуга 'Несуществующая Услуга' не найдена"
)]
#[case::group_class(
    json!({ "trainer_name": "Мастер-тренер", "group_name": "Несуществующее Занятие", "date": "2025-10-01", "time": "10:00" }),
    "Групповое занятие 'Несуществующее Занятие' не найдено"
)]
#[tokio::test]
async fn test_add_time_slot_with_unknown_name(#[case] body: Value, #[case] expected: &str) {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/api/admin/time/add").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "detail": expected }));
}

#[rstest]
#[case::bad_time(json!({ "trainer_name": "Мастер-тренер", "service_name": "Хатха йога", "date": "2025-10-01", "time": "25:99" }))]
#[case::negative_spots(json!({ "trainer_name": "Мастер-тренер", "group_class_name": "Йога критического выравнивания", "date": "2025-10-01", "time": "10:00", "available_spots": -1 }))]
#[case::no_target(json!({ "trainer_name": "Мастер-тренер", "date": "2025-10-01", "time": "10:00" }))]
#[tokio::test]
async fn test_add_time_slot_rejects_invalid_input(#[case] body: Value) {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/api/admin/time/add").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let slots = ctx.repo.find_slots(&SlotFilter::default()).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_get_missing_time_slot() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/admin/time/777").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "detail": SLOT_NOT_FOUND_DETAIL }));
}

#[tokio::test]
async fn test_list_time_slots_by_trainer_and_date() {
    let ctx = TestContext::new().await;
    ctx.individual_slot(9).await;
    ctx.group_slot(2).await;

    let all = ctx
        .server
        .get("/api/admin/times")
        .add_query_param("trainer_id", ctx.trainer.id)
        .add_query_param("date", "2025-10-01")
        .await
        .json::<Vec<Value>>();
    let other_day = ctx
        .server
        .get("/api/admin/times")
        .add_query_param("date", "2025-10-02")
        .await
        .json::<Vec<Value>>();

    assert_eq!(all.len(), 2);
    assert!(other_day.is_empty());
}
