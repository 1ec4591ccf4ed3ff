use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detail returned by the public booking endpoint for every not-found or
/// unavailable outcome.
pub const TIME_TAKEN_DETAIL: &str = "Выбранное время уже занято";

/// Detail returned by the admin endpoint when a time slot id is unknown.
pub const SLOT_NOT_FOUND_DETAIL: &str = "Временной слот не найден";

/// Catalog entity referenced by a booking or a new time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Trainer,
    Service,
    GroupClass,
}

impl EntityKind {
    /// Admin-facing "not found" message, e.g. `Тренер 'Анна' не найден`.
    pub fn not_found_message(&self, key: &str) -> String {
        match self {
            EntityKind::Trainer => format!("Тренер '{}' не найден", key),
            EntityKind::Service => format!("Услуга '{}' не найдена", key),
            EntityKind::GroupClass => format!("Групповое занятие '{}' не найдено", key),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Trainer => "trainer",
            EntityKind::Service => "service",
            EntityKind::GroupClass => "group class",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{}", .entity.not_found_message(.key))]
    EntityNotFound { entity: EntityKind, key: String },

    #[error("Time slot {0} not found")]
    SlotNotFound(i32),

    #[error("Time slot {0} is no longer available")]
    SlotUnavailable(i32),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }

    pub fn entity_not_found(entity: EntityKind, key: impl ToString) -> Self {
        BookingError::EntityNotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// True for the outcomes the public booking flow reports as "time already taken".
    pub fn is_booking_conflict(&self) -> bool {
        matches!(
            self,
            BookingError::EntityNotFound { .. }
                | BookingError::SlotNotFound(_)
                | BookingError::SlotUnavailable(_)
        )
    }

    /// Short label used for metrics and structured logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            BookingError::Validation(_) => "validation_error",
            BookingError::EntityNotFound { .. } => "entity_not_found",
            BookingError::SlotNotFound(_) => "slot_not_found",
            BookingError::SlotUnavailable(_) => "slot_unavailable",
            BookingError::NotFound(_) => "not_found",
            BookingError::Database(_) => "database_error",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
