//! Configuration loading and management for the attendance engine.
//!
//! This module provides the engine thresholds and a loader that reads them,
//! together with the schedule snapshot and hire dates, from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Late after {} min", config.engine().on_time_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BREAK_NOISE_MINUTES, DEFAULT_EARLY_DEPARTURE_MINUTES, DEFAULT_LATE_DEDUCTION_EVERY,
    DEFAULT_LATE_MAX_MINUTES, DEFAULT_ON_TIME_MINUTES, EngineConfig, GRACE_MINUTES,
};
