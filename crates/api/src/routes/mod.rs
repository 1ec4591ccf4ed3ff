pub mod admin;
pub mod booking;
pub mod health;
pub mod metrics;
pub mod time_slot;
