//! Interval matcher - pure blocking decisions over raw block records
//!
//! No state and no I/O; everything above (availability service, calendar
//! synthesizer) is built on these two predicates.

use chrono::NaiveTime;
use planbord_domain::{DateBlock, TimeSlotBlock};

/// Whether a single date block takes the date off the calendar for the
/// given city filter.
///
/// Records with `is_full_day == false` carry slot metadata only and never
/// block a date. An all-cities scope blocks everyone. With no city filter
/// the caller is asking "is this date blocked at all", so any full-day
/// block matches.
pub fn date_block_applies(block: &DateBlock, city: Option<&str>) -> bool {
    if !block.is_full_day {
        return false;
    }
    match city {
        Some(city) => block.scope.applies_to(city),
        None => true,
    }
}

/// Whether a slot block overlaps the queried interval `[start, end)` for
/// the given city filter.
///
/// Standard half-open intersection: `block.start < end && block.end > start`.
/// Boundary-touching intervals do not overlap. An all-cities scope always
/// applies regardless of the filter; a named scope applies only when the
/// filter is absent or names one of its cities.
///
/// The caller guarantees `start < end`; zero-length queries are rejected
/// before reaching the matcher.
pub fn slot_block_overlaps(
    block: &TimeSlotBlock,
    start: NaiveTime,
    end: NaiveTime,
    city: Option<&str>,
) -> bool {
    if let Some(city) = city {
        if !block.scope.applies_to(city) {
            return false;
        }
    }
    block.start_time < end && block.end_time > start
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planbord_domain::CityScope;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn full_day_block(scope: CityScope) -> DateBlock {
        DateBlock {
            id: "blk-1".into(),
            date: date(),
            scope,
            reason: Some("Holiday".into()),
            is_full_day: true,
        }
    }

    fn slot_block(start: NaiveTime, end: NaiveTime, scope: CityScope) -> TimeSlotBlock {
        TimeSlotBlock { id: "slot-1".into(), date: date(), start_time: start, end_time: end, scope, reason: None }
    }

    #[test]
    fn all_cities_block_applies_to_every_city() {
        let block = full_day_block(CityScope::AllCities);
        assert!(date_block_applies(&block, Some("Amsterdam")));
        assert!(date_block_applies(&block, Some("Utrecht")));
        assert!(date_block_applies(&block, None));
    }

    #[test]
    fn named_block_applies_only_to_named_cities() {
        let block = full_day_block(CityScope::from_cities(["Amsterdam", "Utrecht"]));
        assert!(date_block_applies(&block, Some("Amsterdam")));
        assert!(date_block_applies(&block, Some("Utrecht")));
        assert!(!date_block_applies(&block, Some("Rotterdam")));
    }

    #[test]
    fn named_block_without_city_filter_still_blocks() {
        // Caller asks "is this date blocked at all"
        let block = full_day_block(CityScope::from_cities(["Amsterdam"]));
        assert!(date_block_applies(&block, None));
    }

    #[test]
    fn metadata_only_record_never_blocks() {
        let mut block = full_day_block(CityScope::AllCities);
        block.is_full_day = false;
        assert!(!date_block_applies(&block, None));
        assert!(!date_block_applies(&block, Some("Amsterdam")));
    }

    #[test]
    fn slot_overlap_half_open_intersection() {
        let block = slot_block(time(9, 0), time(12, 0), CityScope::from_cities(["Utrecht"]));

        // 11:00-13:00 overlaps 09:00-12:00
        assert!(slot_block_overlaps(&block, time(11, 0), time(13, 0), Some("Utrecht")));
        // Fully inside
        assert!(slot_block_overlaps(&block, time(10, 0), time(11, 0), Some("Utrecht")));
        // Spanning the whole block
        assert!(slot_block_overlaps(&block, time(8, 0), time(13, 0), Some("Utrecht")));
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        let block = slot_block(time(9, 0), time(12, 0), CityScope::AllCities);

        // Query starts exactly where the block ends
        assert!(!slot_block_overlaps(&block, time(12, 0), time(13, 0), None));
        // Query ends exactly where the block starts
        assert!(!slot_block_overlaps(&block, time(8, 0), time(9, 0), None));
    }

    #[test]
    fn slot_scope_filters_city() {
        let block = slot_block(time(9, 0), time(12, 0), CityScope::from_cities(["Utrecht"]));

        assert!(!slot_block_overlaps(&block, time(10, 0), time(11, 0), Some("Amsterdam")));
        // No filter: a named scope still matches ("blocked at all?")
        assert!(slot_block_overlaps(&block, time(10, 0), time(11, 0), None));
    }

    #[test]
    fn all_cities_slot_applies_regardless_of_filter() {
        let block = slot_block(time(9, 0), time(12, 0), CityScope::AllCities);
        assert!(slot_block_overlaps(&block, time(10, 0), time(11, 0), Some("Rotterdam")));
    }

    #[test]
    fn minute_resolution_boundaries() {
        let block = slot_block(time(9, 0), time(9, 1), CityScope::AllCities);
        assert!(slot_block_overlaps(&block, time(9, 0), time(9, 1), None));
        assert!(!slot_block_overlaps(&block, time(9, 1), time(9, 2), None));
    }
}
