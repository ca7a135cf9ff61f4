//! In-memory `ScheduleStore` implementation for testing
//!
//! Deterministic stand-in for the SQLite adapter: plain vectors behind a
//! mutex, with switches to simulate store outages and per-date write
//! failures.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use planbord_core::ScheduleStore;
use tokio_util::sync::CancellationToken;
use planbord_domain::{
    DateBlock, DateSpan, NewScheduleAssignment, PlanbordError, Result, ScheduleAssignment,
    TimeSlotBlock,
};

#[derive(Default)]
struct State {
    date_blocks: Vec<DateBlock>,
    slot_blocks: Vec<TimeSlotBlock>,
    assignments: Vec<ScheduleAssignment>,
    /// When true every store call fails, as if the backend were down.
    unavailable: bool,
    /// Dates whose assignment inserts fail (bulk partial-failure tests).
    failing_dates: HashSet<NaiveDate>,
    /// Cancelled after each successful insert (mid-range cancel tests).
    cancel_on_insert: Option<CancellationToken>,
    insert_calls: usize,
}

/// In-memory mock for `ScheduleStore`.
#[derive(Default)]
pub struct InMemoryScheduleStore {
    state: Mutex<State>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a date block.
    pub fn with_date_block(self, block: DateBlock) -> Self {
        self.state.lock().unwrap().date_blocks.push(block);
        self
    }

    /// Seed a time-slot block.
    pub fn with_slot_block(self, block: TimeSlotBlock) -> Self {
        self.state.lock().unwrap().slot_blocks.push(block);
        self
    }

    /// Seed an assignment row directly.
    pub fn with_assignment(self, assignment: ScheduleAssignment) -> Self {
        self.state.lock().unwrap().assignments.push(assignment);
        self
    }

    /// Make every subsequent store call fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().unavailable = unavailable;
    }

    /// Make assignment inserts fail for one date.
    pub fn fail_inserts_on(&self, date: NaiveDate) {
        self.state.lock().unwrap().failing_dates.insert(date);
    }

    /// Cancel the given token once an assignment insert has committed,
    /// simulating an operator abort racing an in-flight bulk edit.
    pub fn cancel_on_insert(&self, token: CancellationToken) {
        self.state.lock().unwrap().cancel_on_insert = Some(token);
    }

    /// All assignment rows, for assertions.
    pub fn assignments(&self) -> Vec<ScheduleAssignment> {
        self.state.lock().unwrap().assignments.clone()
    }

    /// Assignment rows for one date.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<ScheduleAssignment> {
        self.state.lock().unwrap().assignments.iter().filter(|a| a.date == date).cloned().collect()
    }

    /// Number of `insert_assignments` calls that reached the store.
    pub fn insert_calls(&self) -> usize {
        self.state.lock().unwrap().insert_calls
    }
}

fn check_available(state: &State) -> Result<()> {
    if state.unavailable {
        return Err(PlanbordError::Store("store offline (test)".into()));
    }
    Ok(())
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn list_date_blocks(&self, span: DateSpan) -> Result<Vec<DateBlock>> {
        let state = self.state.lock().unwrap();
        check_available(&state)?;
        Ok(state.date_blocks.iter().filter(|b| span.contains(b.date)).cloned().collect())
    }

    async fn list_time_slot_blocks(&self, span: DateSpan) -> Result<Vec<TimeSlotBlock>> {
        let state = self.state.lock().unwrap();
        check_available(&state)?;
        Ok(state.slot_blocks.iter().filter(|b| span.contains(b.date)).cloned().collect())
    }

    async fn list_assignments(&self, span: DateSpan) -> Result<Vec<ScheduleAssignment>> {
        let state = self.state.lock().unwrap();
        check_available(&state)?;
        Ok(state.assignments.iter().filter(|a| span.contains(a.date)).cloned().collect())
    }

    async fn insert_assignments(&self, rows: &[NewScheduleAssignment]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        state.insert_calls += 1;
        if let Some(row) = rows.iter().find(|r| state.failing_dates.contains(&r.date)) {
            return Err(PlanbordError::Store(format!("write rejected for {} (test)", row.date)));
        }
        for row in rows {
            // Idempotent on (date, city), mirroring the UNIQUE constraint
            let exists =
                state.assignments.iter().any(|a| a.date == row.date && a.city == row.city);
            if !exists {
                state.assignments.push(ScheduleAssignment {
                    id: uuid::Uuid::now_v7().to_string(),
                    date: row.date,
                    city: row.city.clone(),
                });
            }
        }
        if let Some(token) = &state.cancel_on_insert {
            token.cancel();
        }
        Ok(())
    }

    async fn delete_assignment(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        let before = state.assignments.len();
        state.assignments.retain(|a| a.id != id);
        if state.assignments.len() == before {
            return Err(PlanbordError::NotFound(format!("assignment {id}")));
        }
        Ok(())
    }

    async fn insert_date_block(&self, block: &DateBlock) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        state.date_blocks.push(block.clone());
        Ok(())
    }

    async fn update_date_block(&self, block: &DateBlock) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        match state.date_blocks.iter_mut().find(|b| b.id == block.id) {
            Some(existing) => {
                *existing = block.clone();
                Ok(())
            }
            None => Err(PlanbordError::NotFound(format!("date block {}", block.id))),
        }
    }

    async fn delete_date_block(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        let before = state.date_blocks.len();
        state.date_blocks.retain(|b| b.id != id);
        if state.date_blocks.len() == before {
            return Err(PlanbordError::NotFound(format!("date block {id}")));
        }
        Ok(())
    }

    async fn insert_time_slot_block(&self, block: &TimeSlotBlock) -> Result<()> {
        block.validate()?;
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        state.slot_blocks.push(block.clone());
        Ok(())
    }

    async fn update_time_slot_block(&self, block: &TimeSlotBlock) -> Result<()> {
        block.validate()?;
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        match state.slot_blocks.iter_mut().find(|b| b.id == block.id) {
            Some(existing) => {
                *existing = block.clone();
                Ok(())
            }
            None => Err(PlanbordError::NotFound(format!("time slot block {}", block.id))),
        }
    }

    async fn delete_time_slot_block(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        check_available(&state)?;
        let before = state.slot_blocks.len();
        state.slot_blocks.retain(|b| b.id != id);
        if state.slot_blocks.len() == before {
            return Err(PlanbordError::NotFound(format!("time slot block {id}")));
        }
        Ok(())
    }
}
