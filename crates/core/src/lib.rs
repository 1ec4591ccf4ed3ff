//! # Yoga Booking Core
//!
//! Domain types and the booking arbitration logic shared by the storage and
//! HTTP crates. Nothing in here performs I/O directly; persistence is reached
//! through the traits in [`repository`].

pub mod arbitrator;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod queries;
pub mod repository;
