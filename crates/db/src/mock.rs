use async_trait::async_trait;
use mockall::mock;
use yoga_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, BookingDetails, NewBooking},
        catalog::{GroupClass, Service, Trainer},
        time_slot::{NewTimeSlot, SlotFilter, TimeSlot},
    },
    repository::{CatalogRepository, SlotRepository},
};

// Mock repositories for testing
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn get_slot(&self, id: i32) -> BookingResult<Option<TimeSlot>>;

        async fn find_slots(&self, filter: &SlotFilter) -> BookingResult<Vec<TimeSlot>>;

        async fn create_slot(&self, slot: NewTimeSlot) -> BookingResult<TimeSlot>;

        async fn commit_individual_booking(
            &self,
            slot_id: i32,
            booking: NewBooking,
        ) -> BookingResult<Booking>;

        async fn commit_group_booking(
            &self,
            slot_id: i32,
            booking: NewBooking,
        ) -> BookingResult<Booking>;

        async fn booking_details(&self, booking_id: i32) -> BookingResult<Option<BookingDetails>>;

        async fn latest_booking_details(&self) -> BookingResult<Option<BookingDetails>>;
    }
}

mock! {
    pub CatalogRepo {}

    #[async_trait]
    impl CatalogRepository for CatalogRepo {
        async fn trainer_by_id(&self, id: i32) -> BookingResult<Option<Trainer>>;

        async fn trainer_by_name(&self, name: &str) -> BookingResult<Option<Trainer>>;

        async fn service_by_id(&self, id: i32) -> BookingResult<Option<Service>>;

        async fn service_by_name(&self, name: &str) -> BookingResult<Option<Service>>;

        async fn group_class_by_id(&self, id: i32) -> BookingResult<Option<GroupClass>>;

        async fn group_class_by_name(&self, name: &str) -> BookingResult<Option<GroupClass>>;
    }
}
