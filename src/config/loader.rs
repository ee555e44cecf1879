//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! thresholds, the schedule snapshot and hire dates from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleEntry, ScheduleSnapshot};

use super::types::EngineConfig;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml       # Engine thresholds (required)
/// ├── schedules.yaml    # List of schedule entries (required)
/// └── hire_dates.yaml   # employee_id: date map (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("On-time tolerance: {} min", loader.engine().on_time_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    engine: EngineConfig,
    schedules: ScheduleSnapshot,
    hire_dates: HashMap<String, NaiveDate>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `engine.yaml` or `schedules.yaml` is missing
    /// - any present file contains invalid YAML
    /// - the engine thresholds fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;
        engine.validate()?;

        let entries = Self::load_yaml::<Vec<ScheduleEntry>>(&path.join("schedules.yaml"))?;
        let schedules = ScheduleSnapshot::new(entries);

        let hire_dates_path = path.join("hire_dates.yaml");
        let hire_dates = if hire_dates_path.exists() {
            Self::load_yaml::<HashMap<String, NaiveDate>>(&hire_dates_path)?
        } else {
            HashMap::new()
        };

        debug!(
            path = %path.display(),
            schedule_entries = schedules.len(),
            hire_dates = hire_dates.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            engine,
            schedules,
            hire_dates,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine thresholds.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the schedule snapshot.
    pub fn schedules(&self) -> &ScheduleSnapshot {
        &self.schedules
    }

    /// Returns the configured hire dates.
    pub fn hire_dates(&self) -> &HashMap<String, NaiveDate> {
        &self.hire_dates
    }
}
