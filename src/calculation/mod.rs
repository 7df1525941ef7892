//! Calculation logic for the tip splitting engine.
//!
//! This module contains the duration engine, which turns a pair of time
//! labels into signed hours (handling shifts that run past midnight), and the
//! proportional allocation of a tip pool by hours worked.

mod allocation;
mod duration;

pub use allocation::{AllocationResult, allocate_tips, round2};
pub use duration::{DurationRules, ShiftSpan, compute_hours, compute_hours_for_all, resolve_shift};
