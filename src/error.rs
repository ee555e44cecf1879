//! Error types for the attendance reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reconciling punches.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// Configuration and input errors abort a run before it starts. Row-level
/// errors ([`EngineError::InvalidSchedule`], [`EngineError::ProcessingError`])
/// are caught by the engine and recorded on the affected day only.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is out of range or inconsistent with another.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The requested period is reversed or too long.
    #[error("Invalid period {start} to {end}: {message}")]
    InvalidPeriod {
        /// First date of the period.
        start: NaiveDate,
        /// Last date of the period.
        end: NaiveDate,
        /// Why the period was rejected.
        message: String,
    },

    /// A resolved schedule entry cannot be applied to a day.
    #[error("Invalid schedule for employee '{employee_id}' on weekday {iso_weekday}: {message}")]
    InvalidSchedule {
        /// The employee owning the schedule.
        employee_id: String,
        /// ISO weekday (1 = Monday) of the entry.
        iso_weekday: u32,
        /// What made the entry unusable.
        message: String,
    },

    /// A raw punch timestamp could not be parsed.
    #[error("Invalid punch for employee '{employee_id}': '{value}'")]
    InvalidPunch {
        /// The employee the punch belongs to.
        employee_id: String,
        /// The raw timestamp text.
        value: String,
    },

    /// Reconciling a single employee-day failed.
    #[error("Processing failed for employee '{employee_id}' on {date}: {message}")]
    ProcessingError {
        /// The employee of the failed row.
        employee_id: String,
        /// The date of the failed row.
        date: NaiveDate,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
