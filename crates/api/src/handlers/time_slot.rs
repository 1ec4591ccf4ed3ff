use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use yoga_core::models::{
    catalog::{GroupClass, Trainer},
    time_slot::{SlotFilter, SlotKind, TimeSlot},
};

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct TimeSlotQuery {
    pub service_id: i32,
    #[serde(rename = "trainerId", alias = "trainer_id")]
    pub trainer_id: Option<i32>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct GroupClassQuery {
    pub date: NaiveDate,
}

/// One bookable group class occurrence, keyed the way the booking page
/// expects.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupClassSlot {
    #[serde(rename = "GroupClass")]
    pub group_class: GroupClass,
    #[serde(rename = "Trainer")]
    pub trainer: Option<Trainer>,
    #[serde(rename = "TimeSlot")]
    pub time_slot: TimeSlot,
}

/// Free individual slots for a service, optionally narrowed to a trainer
/// and a date.
#[axum::debug_handler]
pub async fn list_time_slots(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<TimeSlotQuery>, QueryRejection>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let Query(query) = query?;

    let filter = SlotFilter {
        trainer_id: query.trainer_id,
        service_id: Some(query.service_id),
        kind: Some(SlotKind::Individual),
        date: query.date,
        only_available: true,
        ..Default::default()
    };
    let slots = state.slots.find_slots(&filter).await?;

    Ok(Json(slots))
}

/// Group class slots on `date` that still have free spots.
#[axum::debug_handler]
pub async fn list_group_classes(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<GroupClassQuery>, QueryRejection>,
) -> Result<Json<Vec<GroupClassSlot>>, AppError> {
    let Query(query) = query?;

    let filter = SlotFilter {
        kind: Some(SlotKind::Group),
        date: Some(query.date),
        only_available: true,
        ..Default::default()
    };
    let slots = state.slots.find_slots(&filter).await?;

    let mut classes = Vec::with_capacity(slots.len());
    for slot in slots {
        let Some(class_id) = slot.group_class_id else {
            continue;
        };
        // Slots whose class was removed are not bookable.
        let Some(group_class) = state.catalog.group_class_by_id(class_id).await? else {
            continue;
        };
        let trainer = match slot.trainer_id {
            Some(id) => state.catalog.trainer_by_id(id).await?,
            None => None,
        };

        classes.push(GroupClassSlot {
            group_class,
            trainer,
            time_slot: slot,
        });
    }

    Ok(Json(classes))
}
