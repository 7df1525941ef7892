//! Core data models for the tip splitting engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod session;
mod snapshot;
mod summary;
mod time_label;
mod worker;

pub use audit::AuditStep;
pub use session::{Session, SessionStatus};
pub use snapshot::Snapshot;
pub use summary::{SessionSummary, WorkerRow};
pub use time_label::{TIME_LABEL_FORMAT, TimeLabel};
pub use worker::{EmployeeId, WorkerEntry};
