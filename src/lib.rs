//! Shift hours and tip pool splitting engine.
//!
//! This crate turns each worker's shift start and end labels into hours
//! worked (including shifts that run past midnight), splits a tip pool in
//! proportion to those hours, and persists the whole session as a single
//! local snapshot.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
