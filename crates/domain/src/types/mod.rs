//! Domain types and models

pub mod calendar;
pub mod schedule;

pub use calendar::CalendarDay;
pub use schedule::{
    AppliedDelta, BulkAssignOutcome, CityDelta, CityScope, DateBlock, DateSpan, FailedDate,
    NewScheduleAssignment, ScheduleAssignment, TimeSlotBlock,
};
