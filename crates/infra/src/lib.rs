//! # Planbord Infrastructure
//!
//! Infrastructure implementation of the core schedule store port.
//!
//! This crate contains:
//! - The SQLite-backed `ScheduleStore` implementation
//! - Connection pooling and schema migrations
//! - Conversions from storage errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `planbord-core`
//! - Depends on `planbord-domain` and `planbord-core`
//! - Contains all "impure" code (I/O)

pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::{DbManager, SqliteScheduleStore};
pub use errors::InfraError;
