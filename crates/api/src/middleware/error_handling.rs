//! # Error Handling Middleware
//!
//! Maps `BookingError` values to HTTP status codes and `{"detail": ...}`
//! JSON bodies.
//!
//! Two wrappers exist because the public booking endpoint and the admin
//! endpoints report conflicts differently:
//!
//! - [`AppError`] keeps the entity-specific message (`Тренер 'X' не найден`).
//! - [`PublicBookingError`] collapses every not-found or unavailable outcome
//!   into the single "time already taken" message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use yoga_core::errors::{BookingError, TIME_TAKEN_DETAIL};

const INTERNAL_DETAIL: &str = "Internal server error";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use yoga_api::middleware::error_handling::AppError;
/// use yoga_core::errors::BookingError;
///
/// async fn handler(id: i32) -> Result<Json<i32>, AppError> {
///     if id < 0 {
///         return Err(AppError(BookingError::validation("id must be positive")));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::EntityNotFound { .. } => StatusCode::BAD_REQUEST,
            BookingError::SlotNotFound(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotUnavailable(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match self.0 {
            BookingError::Validation(message) => message,
            BookingError::NotFound(message) => message,
            BookingError::Database(err) => {
                error!(error = ?err, "Request failed on a persistence error");
                INTERNAL_DETAIL.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Wraps persistence failures that surface outside the repository traits.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Malformed or mistyped JSON bodies become validation errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(BookingError::Validation(rejection.body_text()))
    }
}

/// Error returned by `POST /api/bookings`.
///
/// The caller only learns that the chosen time cannot be booked; which
/// entity was missing stays in the logs and metrics.
#[derive(Debug)]
pub struct PublicBookingError(pub BookingError);

impl IntoResponse for PublicBookingError {
    fn into_response(self) -> Response {
        if self.0.is_booking_conflict() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": TIME_TAKEN_DETAIL })),
            )
                .into_response();
        }

        AppError(self.0).into_response()
    }
}

impl From<BookingError> for PublicBookingError {
    fn from(err: BookingError) -> Self {
        PublicBookingError(err)
    }
}

impl From<JsonRejection> for PublicBookingError {
    fn from(rejection: JsonRejection) -> Self {
        PublicBookingError(BookingError::Validation(rejection.body_text()))
    }
}

/// Maps a BookingError to an HTTP response using the admin-facing mapping.
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
