//! Domain-level constants
//!
//! Centralized location for constants shared across the scheduling engine.

/// Wire format for calendar dates (ISO-8601, no time component).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for times of day. Zero-padded so lexicographic order on the
/// stored text matches chronological order.
pub const TIME_FORMAT: &str = "%H:%M";

/// Default safety rail for bulk range assignment, in days. Roughly one
/// calendar year; guards against fat-fingered multi-year assignments.
pub const DEFAULT_BULK_HORIZON_DAYS: u32 = 366;
