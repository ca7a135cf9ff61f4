//! Availability service - store-backed blocking checks

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use planbord_domain::{DateSpan, PlanbordError, Result};
use tracing::debug;

use crate::availability::matcher::{date_block_applies, slot_block_overlaps};
use crate::ports::ScheduleStore;

/// Store-backed availability checks.
///
/// A store failure propagates to the caller: a booking gate must fail
/// closed, never silently report "not blocked" because the block list
/// could not be fetched.
pub struct AvailabilityService {
    store: Arc<dyn ScheduleStore>,
}

impl AvailabilityService {
    /// Create a new availability service over the given store.
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Whether the date is blocked for booking, optionally narrowed to one
    /// city. Absence of block records means "not blocked".
    pub async fn is_date_blocked(&self, date: NaiveDate, city: Option<&str>) -> Result<bool> {
        let blocks = self.store.list_date_blocks(DateSpan::single(date)).await?;
        let blocked = blocks.iter().any(|b| date_block_applies(b, city));
        debug!(%date, ?city, blocked, candidates = blocks.len(), "date availability check");
        Ok(blocked)
    }

    /// Whether any slot block overlaps `[start, end)` on the date,
    /// optionally narrowed to one city.
    ///
    /// Rejects `start >= end` before touching the store; the matcher
    /// assumes a strictly positive-duration interval.
    pub async fn is_time_slot_blocked(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        city: Option<&str>,
    ) -> Result<bool> {
        if start >= end {
            return Err(PlanbordError::InvalidInput(format!(
                "queried interval start {start} is not before end {end}"
            )));
        }

        let blocks = self.store.list_time_slot_blocks(DateSpan::single(date)).await?;
        let blocked = blocks.iter().any(|b| slot_block_overlaps(b, start, end, city));
        debug!(%date, %start, %end, ?city, blocked, "time slot availability check");
        Ok(blocked)
    }
}
