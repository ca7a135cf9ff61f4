//! SQLite persistence for the schedule record sets

mod manager;
mod schedule_repository;

pub use manager::DbManager;
pub use schedule_repository::SqliteScheduleStore;
