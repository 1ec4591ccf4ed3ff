//! In-process store implementing the repository traits.
//!
//! All state sits behind one async mutex; holding the guard plays the role
//! of the row lock, so every commit checks and mutates without interleaving.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use yoga_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, BookingDetails, NewBooking},
        catalog::{GroupClass, Service, ServiceType, Trainer},
        time_slot::{NewTimeSlot, SlotFilter, SlotKind, TimeSlot},
    },
    repository::{CatalogRepository, SlotRepository},
};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i32,
    trainers: BTreeMap<i32, Trainer>,
    services: BTreeMap<i32, Service>,
    group_classes: BTreeMap<i32, GroupClass>,
    slots: BTreeMap<i32, TimeSlot>,
    bookings: Vec<Booking>,
}

impl MemoryState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn details(&self, booking: &Booking) -> Option<BookingDetails> {
        let slot = self.slots.get(&booking.timeslot_id)?;
        Some(BookingDetails {
            booking_id: booking.id,
            service_name: booking
                .service_id
                .and_then(|id| self.services.get(&id))
                .map(|s| s.name.clone()),
            trainer_name: booking
                .trainer_id
                .and_then(|id| self.trainers.get(&id))
                .map(|t| t.name.clone()),
            class_name: booking
                .group_class_id
                .and_then(|id| self.group_classes.get(&id))
                .map(|g| g.name.clone()),
            date: slot.dates,
            time: slot.times,
            created_at: booking.created_at,
        })
    }

    fn insert_booking(&mut self, new_booking: NewBooking) -> Booking {
        let id = self.next_id();
        let contact = new_booking.contact;
        let booking = Booking {
            id,
            service_id: new_booking.service_id,
            trainer_id: new_booking.trainer_id,
            group_class_id: new_booking.group_class_id,
            timeslot_id: new_booking.timeslot_id,
            date: new_booking.date,
            client_name: contact.as_ref().map(|c| c.name.clone()),
            client_phone: contact.as_ref().map(|c| c.phone.clone()),
            client_email: contact.and_then(|c| c.email),
            created_at: Utc::now(),
        };
        self.bookings.push(booking.clone());
        booking
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_trainer(&self, name: &str, specialization: Option<&str>) -> Trainer {
        let mut state = self.state.lock().await;
        let trainer = Trainer {
            id: state.next_id(),
            name: name.to_string(),
            specialization: specialization.map(str::to_string),
            description: None,
            photo: None,
        };
        state.trainers.insert(trainer.id, trainer.clone());
        trainer
    }

    pub async fn add_service(
        &self,
        name: &str,
        duration: i32,
        price: i32,
        service_type: ServiceType,
    ) -> Service {
        let mut state = self.state.lock().await;
        let service = Service {
            id: state.next_id(),
            name: name.to_string(),
            duration,
            description: None,
            price,
            service_type,
        };
        state.services.insert(service.id, service.clone());
        service
    }

    pub async fn add_group_class(&self, name: &str, duration: i32, price: i32) -> GroupClass {
        let mut state = self.state.lock().await;
        let group_class = GroupClass {
            id: state.next_id(),
            name: name.to_string(),
            duration,
            description: None,
            price,
        };
        state
            .group_classes
            .insert(group_class.id, group_class.clone());
        group_class
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.state.lock().await.bookings.clone()
    }
}

#[async_trait]
impl CatalogRepository for MemoryRepository {
    async fn trainer_by_id(&self, id: i32) -> BookingResult<Option<Trainer>> {
        Ok(self.state.lock().await.trainers.get(&id).cloned())
    }

    async fn trainer_by_name(&self, name: &str) -> BookingResult<Option<Trainer>> {
        let state = self.state.lock().await;
        Ok(state.trainers.values().find(|t| t.name == name).cloned())
    }

    async fn service_by_id(&self, id: i32) -> BookingResult<Option<Service>> {
        Ok(self.state.lock().await.services.get(&id).cloned())
    }

    async fn service_by_name(&self, name: &str) -> BookingResult<Option<Service>> {
        let state = self.state.lock().await;
        Ok(state.services.values().find(|s| s.name == name).cloned())
    }

    async fn group_class_by_id(&self, id: i32) -> BookingResult<Option<GroupClass>> {
        Ok(self.state.lock().await.group_classes.get(&id).cloned())
    }

    async fn group_class_by_name(&self, name: &str) -> BookingResult<Option<GroupClass>> {
        let state = self.state.lock().await;
        Ok(state.group_classes.values().find(|g| g.name == name).cloned())
    }
}

#[async_trait]
impl SlotRepository for MemoryRepository {
    async fn get_slot(&self, id: i32) -> BookingResult<Option<TimeSlot>> {
        Ok(self.state.lock().await.slots.get(&id).cloned())
    }

    async fn find_slots(&self, filter: &SlotFilter) -> BookingResult<Vec<TimeSlot>> {
        let state = self.state.lock().await;
        let mut slots: Vec<TimeSlot> = state
            .slots
            .values()
            .filter(|slot| filter.matches(slot))
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.dates, slot.times, slot.id));
        Ok(slots)
    }

    async fn create_slot(&self, slot: NewTimeSlot) -> BookingResult<TimeSlot> {
        if slot.available_spots < 0 {
            return Err(BookingError::validation("available_spots cannot be negative"));
        }

        let mut state = self.state.lock().await;
        let slot = TimeSlot {
            id: state.next_id(),
            trainer_id: slot.trainer_id,
            service_id: slot.service_id,
            group_class_id: slot.group_class_id,
            dates: slot.dates,
            times: slot.times,
            available: slot.available,
            available_spots: slot.available_spots,
        };
        state.slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn commit_individual_booking(
        &self,
        slot_id: i32,
        new_booking: NewBooking,
    ) -> BookingResult<Booking> {
        let mut state = self.state.lock().await;

        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(BookingError::SlotNotFound(slot_id))?;
        if slot.kind() != SlotKind::Individual || !slot.available {
            return Err(BookingError::SlotUnavailable(slot_id));
        }
        slot.available = false;

        Ok(state.insert_booking(new_booking))
    }

    async fn commit_group_booking(
        &self,
        slot_id: i32,
        new_booking: NewBooking,
    ) -> BookingResult<Booking> {
        let mut state = self.state.lock().await;

        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(BookingError::SlotNotFound(slot_id))?;
        if slot.kind() != SlotKind::Group || !slot.has_capacity() {
            return Err(BookingError::SlotUnavailable(slot_id));
        }
        slot.available_spots -= 1;
        slot.available = slot.available_spots > 0;

        Ok(state.insert_booking(new_booking))
    }

    async fn booking_details(&self, booking_id: i32) -> BookingResult<Option<BookingDetails>> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .and_then(|b| state.details(b)))
    }

    async fn latest_booking_details(&self) -> BookingResult<Option<BookingDetails>> {
        let state = self.state.lock().await;
        Ok(state.bookings.last().and_then(|b| state.details(b)))
    }
}
