//! # Planbord Domain
//!
//! Business domain types and models for the Planbord scheduling engine.
//!
//! This crate contains:
//! - Domain data types (DateBlock, TimeSlotBlock, ScheduleAssignment, ...)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Planbord crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::ScheduleConfig;
pub use errors::{PlanbordError, Result};
pub use types::*;
