mod admin_test;
mod booking_test;
mod health_test;
mod middleware_test;
mod time_slot_test;
