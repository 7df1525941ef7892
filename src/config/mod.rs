//! Configuration loading and management.
//!
//! This module loads the reference data the session works against: general
//! settings, the employee roster and the closed set of selectable time
//! labels.
//!
//! # Example
//!
//! ```no_run
//! use shift_tips::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Roster size: {}", config.roster().entries().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, EmployeeRoster, RosterConfig, RosterEntry, Settings, TimeLabelSet,
    TimeLabelsConfig, WraparoundPolicy,
};
