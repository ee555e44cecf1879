//! Application state for the attendance engine API.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::ScheduleSnapshot;
use crate::reconciliation::AttendanceEngine;

/// Shared application state.
///
/// Holds the configured engine together with the schedules and hire dates
/// used when a request does not bring its own.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AttendanceEngine>,
    schedules: Arc<ScheduleSnapshot>,
    hire_dates: Arc<HashMap<String, NaiveDate>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        engine: AttendanceEngine,
        schedules: ScheduleSnapshot,
        hire_dates: HashMap<String, NaiveDate>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            schedules: Arc::new(schedules),
            hire_dates: Arc::new(hire_dates),
        }
    }

    /// Builds the state from a loaded configuration directory.
    pub fn from_config(config: ConfigLoader) -> EngineResult<Self> {
        let engine = AttendanceEngine::new(config.engine().clone())?;
        Ok(Self::new(
            engine,
            config.schedules().clone(),
            config.hire_dates().clone(),
        ))
    }

    /// Returns the engine.
    pub fn engine(&self) -> &AttendanceEngine {
        &self.engine
    }

    /// Returns the default schedule snapshot.
    pub fn schedules(&self) -> &ScheduleSnapshot {
        &self.schedules
    }

    /// Returns the default hire dates.
    pub fn hire_dates(&self) -> &HashMap<String, NaiveDate> {
        &self.hire_dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_config_uses_loaded_data() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::from_config(config).unwrap();
        assert!(!state.schedules().is_empty());
        assert!(state.hire_dates().contains_key("E300"));
        assert_eq!(state.engine().config().on_time_minutes, 15);
    }
}
