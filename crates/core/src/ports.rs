//! Port interfaces for schedule persistence
//!
//! The engine never talks to a database directly; everything goes through
//! the `ScheduleStore` trait. Reads are span-based (a single date is the
//! one-day span), writes are row-level and independently committed - the
//! engine's bulk operations rely on that when reporting partial failure.

use async_trait::async_trait;
use planbord_domain::{
    DateBlock, DateSpan, NewScheduleAssignment, Result, ScheduleAssignment, TimeSlotBlock,
};

/// Trait for reading and mutating the three schedule record sets.
///
/// Absence of rows is meaningful ("not blocked", "not assigned") and is
/// reported as an empty list, never as an error. A failed read MUST be an
/// error: availability callers fail closed on it rather than defaulting
/// to open booking.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Date blocks whose date falls within the span.
    async fn list_date_blocks(&self, span: DateSpan) -> Result<Vec<DateBlock>>;

    /// Time-slot blocks whose date falls within the span.
    async fn list_time_slot_blocks(&self, span: DateSpan) -> Result<Vec<TimeSlotBlock>>;

    /// Service assignments whose date falls within the span.
    async fn list_assignments(&self, span: DateSpan) -> Result<Vec<ScheduleAssignment>>;

    /// Insert assignment rows. Idempotent on `(date, city)`: re-inserting
    /// an existing pair is a no-op, not an error and not a duplicate row.
    async fn insert_assignments(&self, rows: &[NewScheduleAssignment]) -> Result<()>;

    /// Delete one assignment by its stored id.
    async fn delete_assignment(&self, id: &str) -> Result<()>;

    /// Insert a date block. The caller supplies the id.
    async fn insert_date_block(&self, block: &DateBlock) -> Result<()>;

    /// Replace an existing date block by id.
    async fn update_date_block(&self, block: &DateBlock) -> Result<()>;

    /// Delete a date block by id.
    async fn delete_date_block(&self, id: &str) -> Result<()>;

    /// Insert a time-slot block. The caller supplies the id.
    async fn insert_time_slot_block(&self, block: &TimeSlotBlock) -> Result<()>;

    /// Replace an existing time-slot block by id.
    async fn update_time_slot_block(&self, block: &TimeSlotBlock) -> Result<()>;

    /// Delete a time-slot block by id.
    async fn delete_time_slot_block(&self, id: &str) -> Result<()>;
}
