//! PostgreSQL-backed implementation of the repository traits.
//!
//! Booking commits run in one transaction: `SELECT ... FOR UPDATE` on the
//! slot, a guarded `UPDATE`, then the booking `INSERT`. Returning early drops
//! the transaction, which rolls it back.

use async_trait::async_trait;
use tracing::debug;
use yoga_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, BookingDetails, NewBooking},
        catalog::{GroupClass, Service, Trainer},
        time_slot::{NewTimeSlot, SlotFilter, SlotKind, TimeSlot},
    },
    repository::{CatalogRepository, SlotRepository},
};

use crate::{
    DbPool,
    repositories::{booking, catalog, time_slot},
};

#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgRepository {
    async fn trainer_by_id(&self, id: i32) -> BookingResult<Option<Trainer>> {
        Ok(catalog::get_trainer_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn trainer_by_name(&self, name: &str) -> BookingResult<Option<Trainer>> {
        Ok(catalog::get_trainer_by_name(&self.pool, name)
            .await?
            .map(Into::into))
    }

    async fn service_by_id(&self, id: i32) -> BookingResult<Option<Service>> {
        let row = catalog::get_service_by_id(&self.pool, id).await?;
        Ok(row.map(Service::try_from).transpose()?)
    }

    async fn service_by_name(&self, name: &str) -> BookingResult<Option<Service>> {
        let row = catalog::get_service_by_name(&self.pool, name).await?;
        Ok(row.map(Service::try_from).transpose()?)
    }

    async fn group_class_by_id(&self, id: i32) -> BookingResult<Option<GroupClass>> {
        Ok(catalog::get_group_class_by_id(&self.pool, id)
            .await?
            .map(Into::into))
    }

    async fn group_class_by_name(&self, name: &str) -> BookingResult<Option<GroupClass>> {
        Ok(catalog::get_group_class_by_name(&self.pool, name)
            .await?
            .map(Into::into))
    }
}

#[async_trait]
impl SlotRepository for PgRepository {
    async fn get_slot(&self, id: i32) -> BookingResult<Option<TimeSlot>> {
        Ok(time_slot::get_time_slot_by_id(&self.pool, id)
            .await?
            .map(Into::into))
    }

    async fn find_slots(&self, filter: &SlotFilter) -> BookingResult<Vec<TimeSlot>> {
        let rows = time_slot::find_time_slots(&self.pool, filter).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_slot(&self, slot: NewTimeSlot) -> BookingResult<TimeSlot> {
        Ok(time_slot::create_time_slot(&self.pool, &slot).await?.into())
    }

    async fn commit_individual_booking(
        &self,
        slot_id: i32,
        new_booking: NewBooking,
    ) -> BookingResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(eyre::Report::from)?;

        let slot: TimeSlot = time_slot::lock_time_slot_by_id(&mut *tx, slot_id)
            .await?
            .ok_or(BookingError::SlotNotFound(slot_id))?
            .into();
        if slot.kind() != SlotKind::Individual || !slot.available {
            debug!(slot_id, "Individual slot already taken");
            return Err(BookingError::SlotUnavailable(slot_id));
        }

        if !time_slot::mark_time_slot_unavailable(&mut *tx, slot_id).await? {
            return Err(BookingError::SlotUnavailable(slot_id));
        }
        let created = booking::create_booking(&mut *tx, &new_booking).await?;

        tx.commit().await.map_err(eyre::Report::from)?;
        Ok(created.into())
    }

    async fn commit_group_booking(
        &self,
        slot_id: i32,
        new_booking: NewBooking,
    ) -> BookingResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(eyre::Report::from)?;

        let slot: TimeSlot = time_slot::lock_time_slot_by_id(&mut *tx, slot_id)
            .await?
            .ok_or(BookingError::SlotNotFound(slot_id))?
            .into();
        if slot.kind() != SlotKind::Group || !slot.has_capacity() {
            debug!(slot_id, spots = slot.available_spots, "Group slot is full");
            return Err(BookingError::SlotUnavailable(slot_id));
        }

        let updated = time_slot::take_group_spot(&mut *tx, slot_id)
            .await?
            .ok_or(BookingError::SlotUnavailable(slot_id))?;
        let created = booking::create_booking(&mut *tx, &new_booking).await?;

        tx.commit().await.map_err(eyre::Report::from)?;
        debug!(slot_id, spots_left = updated.available_spots, "Group spot taken");
        Ok(created.into())
    }

    async fn booking_details(&self, booking_id: i32) -> BookingResult<Option<BookingDetails>> {
        Ok(booking::get_booking_details_by_id(&self.pool, booking_id)
            .await?
            .map(Into::into))
    }

    async fn latest_booking_details(&self) -> BookingResult<Option<BookingDetails>> {
        Ok(booking::get_latest_booking_details(&self.pool)
            .await?
            .map(Into::into))
    }
}
