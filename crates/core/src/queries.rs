use std::sync::Arc;

use crate::errors::{BookingError, BookingResult};
use crate::models::booking::BookingDetails;
use crate::repository::SlotRepository;

/// Read-only booking projections for confirmation screens.
#[derive(Clone)]
pub struct BookingQueries {
    slots: Arc<dyn SlotRepository>,
}

impl BookingQueries {
    pub fn new(slots: Arc<dyn SlotRepository>) -> Self {
        Self { slots }
    }

    /// `None` when no booking has been made yet.
    pub async fn get_latest_booking_details(&self) -> BookingResult<Option<BookingDetails>> {
        self.slots.latest_booking_details().await
    }

    pub async fn get_booking_details(&self, booking_id: i32) -> BookingResult<BookingDetails> {
        self.slots
            .booking_details(booking_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Booking {} not found", booking_id)))
    }
}
