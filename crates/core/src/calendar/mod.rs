//! Monthly calendar synthesis

mod service;
pub mod synthesizer;

pub use service::CalendarService;
