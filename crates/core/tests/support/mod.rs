//! Shared test support for core integration tests

// Not every test binary exercises every helper.
#[allow(dead_code)]
pub mod store;

pub use store::InMemoryScheduleStore;
