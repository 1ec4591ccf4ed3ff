//! Storage seams used by the arbitrator and the HTTP layer.
//!
//! Both traits are object safe so the API state can hold `Arc<dyn ...>` and
//! swap the PostgreSQL store for the in-process one in tests.

use async_trait::async_trait;

use crate::errors::BookingResult;
use crate::models::{
    booking::{Booking, BookingDetails, NewBooking},
    catalog::{GroupClass, Service, Trainer},
    time_slot::{NewTimeSlot, SlotFilter, TimeSlot},
};

/// Read-only lookups over trainers, services and group classes.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn trainer_by_id(&self, id: i32) -> BookingResult<Option<Trainer>>;

    async fn trainer_by_name(&self, name: &str) -> BookingResult<Option<Trainer>>;

    async fn service_by_id(&self, id: i32) -> BookingResult<Option<Service>>;

    async fn service_by_name(&self, name: &str) -> BookingResult<Option<Service>>;

    async fn group_class_by_id(&self, id: i32) -> BookingResult<Option<GroupClass>>;

    async fn group_class_by_name(&self, name: &str) -> BookingResult<Option<GroupClass>>;
}

/// Time slot inventory and the bookings that consume it.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Plain read, no lock taken.
    async fn get_slot(&self, id: i32) -> BookingResult<Option<TimeSlot>>;

    /// Slots matching `filter`, ordered by date then time.
    async fn find_slots(&self, filter: &SlotFilter) -> BookingResult<Vec<TimeSlot>>;

    async fn create_slot(&self, slot: NewTimeSlot) -> BookingResult<TimeSlot>;

    /// Locks the slot, requires `available`, flips it to unavailable and
    /// inserts `booking`, all in one transaction.
    ///
    /// Returns `SlotNotFound` for an unknown id and `SlotUnavailable` when the
    /// slot was already taken. Nothing is written on any error.
    async fn commit_individual_booking(
        &self,
        slot_id: i32,
        booking: NewBooking,
    ) -> BookingResult<Booking>;

    /// Locks the slot, requires `available_spots > 0`, takes one spot
    /// (clearing `available` when the last one goes) and inserts `booking`,
    /// all in one transaction.
    async fn commit_group_booking(&self, slot_id: i32, booking: NewBooking)
    -> BookingResult<Booking>;

    async fn booking_details(&self, booking_id: i32) -> BookingResult<Option<BookingDetails>>;

    /// Projection of the most recently created booking.
    async fn latest_booking_details(&self) -> BookingResult<Option<BookingDetails>>;
}
