//! Configuration types for attendance reconciliation.
//!
//! This module contains the strongly-typed engine thresholds that are
//! deserialized from `engine.yaml`.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Minutes after a night shift's scheduled exit during which a next-day
/// punch still belongs to that shift.
pub const GRACE_MINUTES: i64 = 59;

/// Default on-time tolerance in minutes.
pub const DEFAULT_ON_TIME_MINUTES: i64 = 15;
/// Default upper bound in minutes for a day to count as Late.
pub const DEFAULT_LATE_MAX_MINUTES: i64 = 60;
/// Default minutes before the scheduled exit that count as an early departure.
pub const DEFAULT_EARLY_DEPARTURE_MINUTES: i64 = 15;
/// Default minimum gap in minutes for a punch pair to count as a break.
pub const DEFAULT_BREAK_NOISE_MINUTES: i64 = 5;
/// Default cadence of late deductions (every Nth Late occurrence).
pub const DEFAULT_LATE_DEDUCTION_EVERY: u32 = 3;

/// Thresholds and switches for a reconciliation run.
///
/// Every field has a default, so `engine.yaml` only needs to list the
/// values that differ from the standard policy.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.on_time_minutes, 15);
/// assert_eq!(config.late_max_minutes, 60);
/// assert!(!config.forgive_unexcused_absence);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Arrivals up to this many minutes after the scheduled entry are on time.
    pub on_time_minutes: i64,
    /// Arrivals up to this many minutes late are Late; later ones are absences.
    pub late_max_minutes: i64,
    /// Leaving more than this many minutes early is an early departure.
    pub early_departure_minutes: i64,
    /// Punch pairs this many minutes apart or closer are noise, not breaks.
    pub break_noise_minutes: i64,
    /// Every Nth cumulative Late occurrence carries a deduction.
    pub late_deduction_every: u32,
    /// Also forgive UnexcusedAbsence days when worked hours meet expectation.
    pub forgive_unexcused_absence: bool,
    /// Worker threads for per-employee processing; 0 or 1 runs sequentially.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            on_time_minutes: DEFAULT_ON_TIME_MINUTES,
            late_max_minutes: DEFAULT_LATE_MAX_MINUTES,
            early_departure_minutes: DEFAULT_EARLY_DEPARTURE_MINUTES,
            break_noise_minutes: DEFAULT_BREAK_NOISE_MINUTES,
            late_deduction_every: DEFAULT_LATE_DEDUCTION_EVERY,
            forgive_unexcused_absence: false,
            workers: 0,
        }
    }
}

impl EngineConfig {
    /// Checks that the thresholds are consistent with each other.
    pub fn validate(&self) -> EngineResult<()> {
        if self.on_time_minutes < 0 {
            return Err(invalid("on_time_minutes", "must not be negative"));
        }
        if self.on_time_minutes >= self.late_max_minutes {
            return Err(invalid(
                "on_time_minutes",
                format!(
                    "must be lower than late_max_minutes ({} >= {})",
                    self.on_time_minutes, self.late_max_minutes
                ),
            ));
        }
        if self.early_departure_minutes < 0 {
            return Err(invalid("early_departure_minutes", "must not be negative"));
        }
        if self.break_noise_minutes < 0 {
            return Err(invalid("break_noise_minutes", "must not be negative"));
        }
        if self.late_deduction_every == 0 {
            return Err(invalid("late_deduction_every", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}
