use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use std::sync::Arc;
use yoga_core::models::booking::{
    BookingDetails, BookingDetailsResponse, CreateBookingPayload, CreateBookingResponse,
};

use crate::{
    ApiState,
    middleware::error_handling::{AppError, PublicBookingError},
};

/// Books an individual session or a group class spot.
///
/// The body shape decides the flow: `serviceId` + `trainerId` for an
/// individual session, `classId` plus contact fields for a group class.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateBookingPayload>, JsonRejection>,
) -> Result<Json<CreateBookingResponse>, PublicBookingError> {
    let Json(payload) = payload?;

    let booking = state.arbitrator.create_booking(payload).await?;

    Ok(Json(CreateBookingResponse {
        booking_id: booking.id,
    }))
}

#[axum::debug_handler]
pub async fn get_latest_booking_details(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<BookingDetailsResponse>, AppError> {
    let details = state.queries.get_latest_booking_details().await?;

    Ok(Json(details.into()))
}

#[axum::debug_handler]
pub async fn get_booking_details(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<BookingDetails>, AppError> {
    let details = state.queries.get_booking_details(id).await?;

    Ok(Json(details))
}
