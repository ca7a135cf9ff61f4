//! Calendar service - fetches one month of records and synthesizes the view

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use planbord_domain::{CalendarDay, DateSpan, Result, ScheduleConfig};
use tracing::debug;

use crate::calendar::synthesizer::{month_bounds, synthesize_month};
use crate::ports::ScheduleStore;

/// Store-backed monthly calendar construction.
///
/// Fetch failures propagate: a month view is never silently rendered as
/// unblocked when the block list could not be read.
pub struct CalendarService {
    store: Arc<dyn ScheduleStore>,
    config: ScheduleConfig,
}

impl CalendarService {
    /// Create a new calendar service over the given store.
    pub fn new(store: Arc<dyn ScheduleStore>, config: ScheduleConfig) -> Self {
        Self { store, config }
    }

    /// Build the `CalendarDay` list for the given month, classifying
    /// today/past/future against the current UTC date.
    pub async fn calendar_month(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>> {
        self.calendar_month_at(year, month, Utc::now().date_naive()).await
    }

    /// Same as [`calendar_month`](Self::calendar_month) with an explicit
    /// observation date.
    pub async fn calendar_month_at(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<Vec<CalendarDay>> {
        let span = month_span(year, month)?;

        let assignments = self.store.list_assignments(span).await?;
        let date_blocks = self.store.list_date_blocks(span).await?;
        debug!(
            year,
            month,
            assignments = assignments.len(),
            date_blocks = date_blocks.len(),
            "synthesizing calendar month"
        );

        synthesize_month(year, month, today, &assignments, &date_blocks, &self.config.city_universe)
    }
}

fn month_span(year: i32, month: u32) -> Result<DateSpan> {
    let (first, last) = month_bounds(year, month)?;
    DateSpan::new(first, last)
}
