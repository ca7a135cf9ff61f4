//! # Planbord Core
//!
//! Pure business logic layer of the availability and scheduling
//! resolution engine - no infrastructure dependencies.
//!
//! This crate contains:
//! - The interval matcher (pure date/time-slot blocking decisions)
//! - The calendar synthesizer (monthly view-model construction)
//! - The schedule editor (diff-based assignment reconciliation)
//! - The store port trait the infrastructure layer implements
//!
//! ## Architecture Principles
//! - Only depends on `planbord-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod availability;
pub mod calendar;
pub mod editor;
pub mod ports;

// Re-export specific items to avoid ambiguity
pub use availability::matcher::{date_block_applies, slot_block_overlaps};
pub use availability::AvailabilityService;
pub use calendar::synthesizer::synthesize_month;
pub use calendar::CalendarService;
pub use editor::diff::reconcile;
pub use editor::ScheduleEditor;
pub use ports::ScheduleStore;
