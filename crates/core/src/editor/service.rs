//! Schedule editor service - applies reconciliations and bulk assignments
//! through the store port

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use planbord_domain::{
    AppliedDelta, BulkAssignOutcome, DateSpan, FailedDate, NewScheduleAssignment, PlanbordError,
    Result, ScheduleConfig,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::editor::diff::reconcile;
use crate::ports::ScheduleStore;

/// Mutates schedule assignments with explicit diffing.
///
/// Blocking records are never touched here: assignment and blocking are
/// independent axes that only the UI combines for display. Concurrent
/// edits to the same date are not locked; last write wins at the store
/// layer unless the caller uses the checked variant.
pub struct ScheduleEditor {
    store: Arc<dyn ScheduleStore>,
    config: ScheduleConfig,
}

impl ScheduleEditor {
    /// Create a new editor over the given store.
    pub fn new(store: Arc<dyn ScheduleStore>, config: ScheduleConfig) -> Self {
        Self { store, config }
    }

    /// Reconcile one date's assignments against the desired city set.
    ///
    /// Fetches the authoritative current set, computes the delta, deletes
    /// removed rows by stored id (all duplicate rows for a removed city
    /// are deleted), then inserts added rows. A partial failure leaves the
    /// store partially applied; the caller must re-fetch rather than trust
    /// its in-memory view.
    pub async fn assign_cities_to_date(
        &self,
        date: NaiveDate,
        desired: &[String],
    ) -> Result<AppliedDelta> {
        let current = self.store.list_assignments(DateSpan::single(date)).await?;
        let current_cities: Vec<String> = current.iter().map(|a| a.city.clone()).collect();

        let delta = reconcile(&current_cities, desired);
        debug!(%date, to_add = delta.to_add.len(), to_remove = delta.to_remove.len(), "reconciling date assignment");
        if delta.is_empty() {
            return Ok(AppliedDelta::default());
        }

        // Removals first; the two batches touch disjoint cities, so the
        // order is a convention rather than a requirement.
        for city in &delta.to_remove {
            for row in current.iter().filter(|a| &a.city == city) {
                self.store.delete_assignment(&row.id).await?;
            }
        }

        if !delta.to_add.is_empty() {
            let rows: Vec<NewScheduleAssignment> = delta
                .to_add
                .iter()
                .map(|city| NewScheduleAssignment { date, city: city.clone() })
                .collect();
            self.store.insert_assignments(&rows).await?;
        }

        Ok(AppliedDelta { added: delta.to_add, removed: delta.to_remove })
    }

    /// Optimistic variant of [`assign_cities_to_date`](Self::assign_cities_to_date):
    /// fails without writing when the store's current city set no longer
    /// matches what the operator was shown.
    pub async fn assign_cities_to_date_checked(
        &self,
        date: NaiveDate,
        expected_current: &[String],
        desired: &[String],
    ) -> Result<AppliedDelta> {
        let actual = self.store.list_assignments(DateSpan::single(date)).await?;
        let actual_set: BTreeSet<&str> = actual.iter().map(|a| a.city.as_str()).collect();
        let expected_set: BTreeSet<&str> = expected_current.iter().map(String::as_str).collect();

        if actual_set != expected_set {
            return Err(PlanbordError::ConcurrentModification(format!(
                "assignments for {date} changed: expected [{}], found [{}]",
                expected_set.iter().copied().collect::<Vec<_>>().join(", "),
                actual_set.iter().copied().collect::<Vec<_>>().join(", ")
            )));
        }

        self.assign_cities_to_date(date, desired).await
    }

    /// Assign every city in `cities` to every date in `[start, end]`.
    ///
    /// See [`bulk_assign_range_with_cancel`](Self::bulk_assign_range_with_cancel).
    pub async fn bulk_assign_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cities: &[String],
    ) -> Result<BulkAssignOutcome> {
        self.bulk_assign_range_with_cancel(start, end, cities, &CancellationToken::new()).await
    }

    /// Assign every city in `cities` to every date in `[start, end]`,
    /// observing `cancel` between per-date writes.
    ///
    /// Not atomic across the range: each date commits independently, a
    /// per-date failure is recorded and the remaining dates still run, and
    /// cancellation leaves a valid (just incomplete) prefix. Re-running
    /// over the same range is idempotent; already-assigned pairs produce
    /// no new rows.
    pub async fn bulk_assign_range_with_cancel(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cities: &[String],
        cancel: &CancellationToken,
    ) -> Result<BulkAssignOutcome> {
        self.config.validate()?;
        let span = DateSpan::new(start, end)?;
        let horizon = i64::from(self.config.bulk_horizon_days);
        if span.len_days() > horizon {
            return Err(PlanbordError::InvalidInput(format!(
                "range of {} days exceeds the configured horizon of {} days",
                span.len_days(),
                horizon
            )));
        }
        if cities.is_empty() {
            return Err(PlanbordError::InvalidInput(
                "bulk assignment requires at least one city".into(),
            ));
        }

        let desired: BTreeSet<&str> = cities.iter().map(String::as_str).collect();
        let mut outcome = BulkAssignOutcome::default();

        for date in span.iter_dates() {
            if cancel.is_cancelled() {
                debug!(%date, "bulk assignment cancelled; keeping completed prefix");
                break;
            }
            match self.assign_missing(date, &desired).await {
                Ok(()) => outcome.succeeded_dates.push(date),
                Err(err) => {
                    warn!(%date, error = %err, "bulk assignment failed for date; continuing");
                    outcome.failed_dates.push(FailedDate { date, error: err.to_string() });
                }
            }
        }

        Ok(outcome)
    }

    /// Insert the not-yet-assigned `(date, city)` pairs for one date.
    async fn assign_missing(&self, date: NaiveDate, desired: &BTreeSet<&str>) -> Result<()> {
        let existing = self.store.list_assignments(DateSpan::single(date)).await?;
        let existing: BTreeSet<&str> = existing.iter().map(|a| a.city.as_str()).collect();

        let rows: Vec<NewScheduleAssignment> = desired
            .difference(&existing)
            .map(|city| NewScheduleAssignment { date, city: (*city).to_string() })
            .collect();

        if rows.is_empty() {
            return Ok(());
        }
        self.store.insert_assignments(&rows).await
    }
}
