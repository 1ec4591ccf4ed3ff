pub mod booking;
pub mod catalog;
pub mod time_slot;
