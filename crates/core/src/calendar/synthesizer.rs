//! Calendar synthesizer - pure monthly view-model construction
//!
//! Merges pre-fetched assignment and block records into one `CalendarDay`
//! per date of the month. All inputs arrive as arguments; the observation
//! instant (`today`) is explicit so classification is deterministic under
//! test.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use planbord_domain::{
    CalendarDay, CityScope, DateBlock, PlanbordError, Result, ScheduleAssignment,
};

/// First and last day of the given month.
pub(crate) fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        PlanbordError::InvalidInput(format!("invalid calendar month {year}-{month:02}"))
    })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // pred_opt only fails at NaiveDate::MIN, unreachable from a first-of-month
    let last = next_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| PlanbordError::Internal("month bound overflow".into()))?;
    Ok((first, last))
}

/// Build one `CalendarDay` per date of the month, ascending, no gaps.
///
/// `assignments` and `date_blocks` may contain rows outside the month;
/// they are ignored. Blocking resolution considers full-day blocks only:
/// a covering block whose scope is all-cities, or names the entire
/// `city_universe`, marks the day fully blocked; otherwise the union of
/// partial-block cities is surfaced as `blocked_cities` so operators can
/// be warned during editing.
pub fn synthesize_month(
    year: i32,
    month: u32,
    today: NaiveDate,
    assignments: &[ScheduleAssignment],
    date_blocks: &[DateBlock],
    city_universe: &BTreeSet<String>,
) -> Result<Vec<CalendarDay>> {
    let (first, last) = month_bounds(year, month)?;

    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date <= last {
        let mut day = CalendarDay::unblocked(date, today);

        // Union of assigned cities, deduplicated; no ordering guarantee.
        let assigned: BTreeSet<&str> = assignments
            .iter()
            .filter(|a| a.date == date)
            .map(|a| a.city.as_str())
            .collect();
        day.assigned_cities = assigned.into_iter().map(ToString::to_string).collect();

        resolve_blocking(&mut day, date_blocks, city_universe);

        days.push(day);
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    // One entry per calendar day, by construction
    debug_assert_eq!(days.len() as u32, last.day());
    Ok(days)
}

fn resolve_blocking(day: &mut CalendarDay, date_blocks: &[DateBlock], universe: &BTreeSet<String>) {
    let covering: Vec<&DateBlock> =
        date_blocks.iter().filter(|b| b.is_full_day && b.date == day.date).collect();
    if covering.is_empty() {
        return;
    }

    day.blocked_reason = covering.iter().find_map(|b| b.reason.clone());

    if covering.iter().any(|b| b.scope.covers_universe(universe)) {
        day.is_fully_blocked = true;
        day.blocked_cities = Vec::new();
        return;
    }

    // Partial blocks: surface the union of named cities.
    let mut blocked: BTreeSet<String> = BTreeSet::new();
    for block in &covering {
        if let CityScope::Cities(cities) = &block.scope {
            blocked.extend(cities.iter().cloned());
        }
    }
    day.blocked_cities = blocked.into_iter().collect();
}
