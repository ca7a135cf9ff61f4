//! Schedule editing: diff-based assignment reconciliation and bulk writes

pub mod diff;
mod service;

pub use service::ScheduleEditor;
