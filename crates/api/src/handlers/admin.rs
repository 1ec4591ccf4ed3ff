use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use yoga_core::{
    errors::{BookingError, EntityKind, SLOT_NOT_FOUND_DETAIL},
    models::time_slot::{
        CreateTimeSlotRequest, CreateTimeSlotResponse, NewTimeSlot, SlotFilter, TimeSlot,
    },
};

use crate::{ApiState, middleware::error_handling::AppError};

const SLOT_CREATED_MESSAGE: &str = "Временной слот успешно добавлен";

#[derive(Debug, Default, Deserialize)]
pub struct AdminTimeSlotQuery {
    pub trainer_id: Option<i32>,
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn get_time_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state
        .slots
        .get_slot(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(SLOT_NOT_FOUND_DETAIL.to_string()))?;

    Ok(Json(slot))
}

/// Every slot, booked or not, optionally narrowed to a trainer and a date.
#[axum::debug_handler]
pub async fn list_time_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AdminTimeSlotQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let filter = SlotFilter {
        trainer_id: query.trainer_id,
        date: query.date,
        ..Default::default()
    };
    let slots = state.slots.find_slots(&filter).await?;

    Ok(Json(slots))
}

/// Creates a slot from human-readable names.
///
/// Exactly one of `service_name` (individual slot) or `group_class_name`
/// (group slot with `available_spots` seats) must be given.
#[axum::debug_handler]
pub async fn add_time_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateTimeSlotRequest>, JsonRejection>,
) -> Result<Json<CreateTimeSlotResponse>, AppError> {
    let Json(payload) = payload?;

    let times = payload.parse_time()?;
    if payload.available_spots < 0 {
        return Err(BookingError::validation("available_spots cannot be negative").into());
    }

    let trainer = state
        .catalog
        .trainer_by_name(&payload.trainer_name)
        .await?
        .ok_or_else(|| BookingError::entity_not_found(EntityKind::Trainer, &payload.trainer_name))?;

    let new_slot = match (&payload.service_name, &payload.group_class_name) {
        (Some(service_name), None) => {
            let service = state
                .catalog
                .service_by_name(service_name)
                .await?
                .ok_or_else(|| BookingError::entity_not_found(EntityKind::Service, service_name))?;

            NewTimeSlot {
                trainer_id: Some(trainer.id),
                service_id: Some(service.id),
                group_class_id: None,
                dates: payload.date,
                times,
                available: payload.status,
                available_spots: payload.available_spots,
            }
        }
        (None, Some(class_name)) => {
            let group_class = state
                .catalog
                .group_class_by_name(class_name)
                .await?
                .ok_or_else(|| BookingError::entity_not_found(EntityKind::GroupClass, class_name))?;

            NewTimeSlot {
                trainer_id: Some(trainer.id),
                service_id: None,
                group_class_id: Some(group_class.id),
                dates: payload.date,
                times,
                available: payload.status && payload.available_spots > 0,
                available_spots: payload.available_spots,
            }
        }
        (Some(_), Some(_)) => {
            return Err(BookingError::validation(
                "service_name cannot be combined with group_class_name",
            )
            .into());
        }
        (None, None) => {
            return Err(
                BookingError::validation("Either service_name or group_class_name is required").into(),
            );
        }
    };

    let time_slot = state.slots.create_slot(new_slot).await?;
    info!(
        slot_id = time_slot.id,
        trainer_id = trainer.id,
        date = %time_slot.dates,
        time = %time_slot.times,
        "Time slot added"
    );

    Ok(Json(CreateTimeSlotResponse {
        message: SLOT_CREATED_MESSAGE.to_string(),
        time_slot,
    }))
}
