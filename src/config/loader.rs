//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading settings, the
//! employee roster and the selectable time labels from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{TipError, TipResult};

use super::types::{
    AppConfig, EmployeeRoster, RosterConfig, Settings, TimeLabelSet, TimeLabelsConfig,
};

const BUILTIN_SETTINGS: &str = include_str!("../../config/default/settings.yaml");
const BUILTIN_ROSTER: &str = include_str!("../../config/default/roster.yaml");
const BUILTIN_TIME_LABELS: &str = include_str!("../../config/default/time_labels.yaml");

/// Loads and provides access to configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml     # Storage key, anchor date, wraparound policy
/// ├── roster.yaml       # Employee id → display name
/// └── time_labels.yaml  # Selectable half-hour labels
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_tips::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Snapshot key: {}", loader.settings().storage_key);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> TipResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        let roster = Self::load_yaml::<RosterConfig>(&path.join("roster.yaml"))?;
        let labels = Self::load_yaml::<TimeLabelsConfig>(&path.join("time_labels.yaml"))?;

        Ok(Self::assemble(settings, roster, labels))
    }

    /// Builds the default configuration compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_tips::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// assert_eq!(loader.settings().storage_key, "shiftData");
    /// assert_eq!(loader.roster().entries().len(), 11);
    /// assert_eq!(loader.time_labels().labels().len(), 22);
    /// ```
    pub fn builtin() -> TipResult<Self> {
        let settings = Self::parse_yaml::<Settings>(BUILTIN_SETTINGS, "<builtin>/settings.yaml")?;
        let roster = Self::parse_yaml::<RosterConfig>(BUILTIN_ROSTER, "<builtin>/roster.yaml")?;
        let labels = Self::parse_yaml::<TimeLabelsConfig>(
            BUILTIN_TIME_LABELS,
            "<builtin>/time_labels.yaml",
        )?;

        Ok(Self::assemble(settings, roster, labels))
    }

    fn assemble(settings: Settings, roster: RosterConfig, labels: TimeLabelsConfig) -> Self {
        let config = AppConfig::new(
            settings,
            EmployeeRoster::new(roster.employees),
            TimeLabelSet::new(labels.labels),
        );
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> TipResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TipError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> TipResult<T> {
        serde_yaml::from_str(content).map_err(|e| TipError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the employee roster.
    pub fn roster(&self) -> &EmployeeRoster {
        self.config.roster()
    }

    /// Returns the selectable time labels.
    pub fn time_labels(&self) -> &TimeLabelSet {
        self.config.time_labels()
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
