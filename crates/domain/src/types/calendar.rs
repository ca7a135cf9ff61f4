//! Derived calendar view types
//!
//! `CalendarDay` is recomputed on every read; it has no identity or
//! persistence of its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Synthesized view-model for one date within a displayed month.
///
/// `is_today`, `is_past` and `is_future` are not mutually exhaustive:
/// today is simultaneously neither past nor future, so consumers must
/// check `is_today` first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,

    /// Cities with a service assignment on this date, deduplicated.
    /// Ordering carries no meaning; the UI may sort for display.
    pub assigned_cities: Vec<String>,

    pub is_today: bool,
    /// Always true for days produced by the synthesizer itself. Callers
    /// that pad the grid with adjacent-month days flag those false on
    /// their side.
    pub is_current_month: bool,
    pub is_past: bool,
    pub is_future: bool,

    /// True only when a covering full-day block applies to every city,
    /// either via the all-cities scope or by naming the whole universe.
    pub is_fully_blocked: bool,

    /// Cities named by partial covering blocks. Empty when fully blocked
    /// or unblocked. Used to warn operators during editing.
    pub blocked_cities: Vec<String>,

    /// Reason text from the covering block, if any carries one.
    pub blocked_reason: Option<String>,
}

impl CalendarDay {
    /// An unremarkable day: no assignments, no blocks.
    pub fn unblocked(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            assigned_cities: Vec::new(),
            is_today: date == today,
            is_current_month: true,
            is_past: date < today,
            is_future: date > today,
            is_fully_blocked: false,
            blocked_cities: Vec::new(),
            blocked_reason: None,
        }
    }
}
