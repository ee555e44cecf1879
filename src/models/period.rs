//! Reporting period model.
//!
//! This module contains the [`AttendancePeriod`] type that bounds a
//! reconciliation run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest period a single run accepts, in days.
pub const MAX_PERIOD_DAYS: i64 = 366;

/// The inclusive date range a run reconciles.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendancePeriod;
/// use chrono::NaiveDate;
///
/// let period = AttendancePeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()));
/// assert_eq!(period.dates().len(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePeriod {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl AttendancePeriod {
    /// Checks if a given date falls within this period, both ends inclusive.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns every date in the period in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .collect()
    }

    /// Number of days in the period, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Rejects reversed periods and periods longer than [`MAX_PERIOD_DAYS`].
    pub fn validate(&self) -> EngineResult<()> {
        let message = if self.start_date > self.end_date {
            "start is after end".to_string()
        } else if self.len_days() > MAX_PERIOD_DAYS {
            format!("period spans more than {} days", MAX_PERIOD_DAYS)
        } else {
            return Ok(());
        };
        Err(EngineError::InvalidPeriod {
            start: self.start_date,
            end: self.end_date,
            message,
        })
    }
}
