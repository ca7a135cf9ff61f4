//! Integration tests for the calendar service over an in-memory store

use std::sync::Arc;

use chrono::NaiveDate;
use planbord_core::CalendarService;
use planbord_domain::{CityScope, DateBlock, PlanbordError, ScheduleAssignment, ScheduleConfig};

mod support;
use support::InMemoryScheduleStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config() -> ScheduleConfig {
    ScheduleConfig::new(["Amsterdam", "Utrecht", "Rotterdam"])
}

#[tokio::test]
async fn full_block_and_assignment_coexist() {
    // A holiday block plus a separately assigned city on the same date.
    // The conflict is reported, not hidden.
    let on = date(2025, 6, 10);
    let store = Arc::new(
        InMemoryScheduleStore::new()
            .with_date_block(DateBlock {
                id: "blk-1".into(),
                date: on,
                scope: CityScope::AllCities,
                reason: Some("Holiday".into()),
                is_full_day: true,
            })
            .with_assignment(ScheduleAssignment {
                id: "a-1".into(),
                date: on,
                city: "Amsterdam".into(),
            }),
    );
    let service = CalendarService::new(store, config());

    let days = service.calendar_month_at(2025, 6, date(2025, 6, 1)).await.unwrap();

    assert_eq!(days.len(), 30);
    let day = &days[9];
    assert_eq!(day.date, on);
    assert_eq!(day.assigned_cities, vec!["Amsterdam".to_string()]);
    assert!(day.is_fully_blocked);
    assert!(day.blocked_cities.is_empty());
    assert_eq!(day.blocked_reason.as_deref(), Some("Holiday"));
}

#[tokio::test]
async fn partial_block_warns_without_fully_blocking() {
    let on = date(2025, 6, 12);
    let store = Arc::new(InMemoryScheduleStore::new().with_date_block(DateBlock {
        id: "blk-2".into(),
        date: on,
        scope: CityScope::from_cities(["Utrecht"]),
        reason: None,
        is_full_day: true,
    }));
    let service = CalendarService::new(store, config());

    let days = service.calendar_month_at(2025, 6, date(2025, 6, 1)).await.unwrap();

    let day = &days[11];
    assert!(!day.is_fully_blocked);
    assert_eq!(day.blocked_cities, vec!["Utrecht".to_string()]);
}

#[tokio::test]
async fn fetch_failure_propagates_instead_of_rendering_open_month() {
    let store = Arc::new(InMemoryScheduleStore::new());
    store.set_unavailable(true);
    let service = CalendarService::new(store, config());

    let err = service.calendar_month_at(2025, 6, date(2025, 6, 1)).await.unwrap_err();
    assert!(matches!(err, PlanbordError::Store(_)));
}

#[tokio::test]
async fn invalid_month_rejected_before_synthesis() {
    let store = Arc::new(InMemoryScheduleStore::new());
    let service = CalendarService::new(store, config());

    let err = service.calendar_month_at(2025, 0, date(2025, 6, 1)).await.unwrap_err();
    assert!(matches!(err, PlanbordError::InvalidInput(_)));
}
