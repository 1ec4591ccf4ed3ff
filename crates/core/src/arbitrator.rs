//! # Booking Arbitration
//!
//! The arbitrator is the single place that decides whether a booking may
//! consume a slot. It resolves the slot and the referenced catalog entities,
//! then hands the check-and-mutate step to the repository, which runs it
//! under a row lock together with the booking insert.
//!
//! The pre-checks performed here (slot kind, matching ids, current capacity)
//! only short-circuit obviously doomed requests. Correctness under
//! concurrency comes from the repository commit, which re-validates capacity
//! after acquiring the lock.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::errors::{BookingError, BookingResult, EntityKind};
use crate::metrics::Metrics;
use crate::models::booking::{
    Booking, BookingRequest, CreateBookingPayload, GroupBookingRequest, IndividualBookingRequest,
    NewBooking,
};
use crate::models::time_slot::{SlotKind, TimeSlot};
use crate::repository::{CatalogRepository, SlotRepository};

#[derive(Clone)]
pub struct BookingArbitrator {
    slots: Arc<dyn SlotRepository>,
    catalog: Arc<dyn CatalogRepository>,
    metrics: Arc<Metrics>,
}

impl BookingArbitrator {
    pub fn new(
        slots: Arc<dyn SlotRepository>,
        catalog: Arc<dyn CatalogRepository>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            slots,
            catalog,
            metrics,
        }
    }

    /// Validates the payload shape and books it.
    ///
    /// Exactly one booking row is created on success; on any error the store
    /// is left as it was.
    pub async fn create_booking(&self, payload: CreateBookingPayload) -> BookingResult<Booking> {
        let started = Instant::now();

        let (kind, result) = match BookingRequest::try_from(payload) {
            Ok(request) => (request.kind_label(), self.arbitrate(request).await),
            Err(err) => ("unknown", Err(err)),
        };

        let outcome = match &result {
            Ok(_) => "success",
            Err(err) => err.outcome(),
        };
        self.metrics
            .bookings
            .record(kind, outcome, started.elapsed());

        match &result {
            Ok(booking) => info!(
                booking_id = booking.id,
                timeslot_id = booking.timeslot_id,
                kind,
                "Booking created"
            ),
            Err(BookingError::Database(err)) => {
                error!(kind, error = %err, "Booking failed on a persistence error")
            }
            Err(err) => warn!(kind, outcome, error = %err, "Booking rejected"),
        }

        result
    }

    async fn arbitrate(&self, request: BookingRequest) -> BookingResult<Booking> {
        let slot = self
            .slots
            .get_slot(request.time_slot_id())
            .await?
            .ok_or(BookingError::SlotNotFound(request.time_slot_id()))?;

        match request {
            BookingRequest::Individual(request) => self.book_individual(slot, request).await,
            BookingRequest::Group(request) => self.book_group(slot, request).await,
        }
    }

    async fn book_individual(
        &self,
        slot: TimeSlot,
        request: IndividualBookingRequest,
    ) -> BookingResult<Booking> {
        let trainer = self
            .catalog
            .trainer_by_id(request.trainer_id)
            .await?
            .ok_or_else(|| BookingError::entity_not_found(EntityKind::Trainer, request.trainer_id))?;
        let service = self
            .catalog
            .service_by_id(request.service_id)
            .await?
            .ok_or_else(|| BookingError::entity_not_found(EntityKind::Service, request.service_id))?;

        let offered = slot.kind() == SlotKind::Individual
            && slot.service_id == Some(service.id)
            && slot.trainer_id.is_none_or(|id| id == trainer.id)
            && slot.dates == request.date;
        if !offered || !slot.has_capacity() {
            return Err(BookingError::SlotUnavailable(slot.id));
        }

        let booking = NewBooking {
            service_id: Some(service.id),
            trainer_id: Some(trainer.id),
            group_class_id: None,
            timeslot_id: slot.id,
            date: request.date,
            contact: None,
        };

        self.slots.commit_individual_booking(slot.id, booking).await
    }

    async fn book_group(
        &self,
        slot: TimeSlot,
        request: GroupBookingRequest,
    ) -> BookingResult<Booking> {
        let group_class = self
            .catalog
            .group_class_by_id(request.class_id)
            .await?
            .ok_or_else(|| BookingError::entity_not_found(EntityKind::GroupClass, request.class_id))?;

        let offered = slot.group_class_id == Some(group_class.id) && slot.dates == request.date;
        if !offered || !slot.has_capacity() {
            return Err(BookingError::SlotUnavailable(slot.id));
        }

        let booking = NewBooking {
            service_id: None,
            trainer_id: slot.trainer_id,
            group_class_id: Some(group_class.id),
            timeslot_id: slot.id,
            date: request.date,
            contact: Some(request.contact),
        };

        self.slots.commit_group_booking(slot.id, booking).await
    }
}
