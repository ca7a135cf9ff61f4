//! Availability decisions: is a date or time window open for booking?

pub mod matcher;
mod service;

pub use service::AvailabilityService;
