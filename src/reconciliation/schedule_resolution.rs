//! Schedule resolution.
//!
//! Attaches the applicable [`ScheduleEntry`](crate::models::ScheduleEntry)
//! to a day record so later stages can read scheduled times and expected
//! hours straight from the record.

use chrono::Duration;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayRecord, ScheduleLookup, hours_to_duration};

/// Resolves and applies the schedule for one day.
///
/// Days without a schedule keep zero expected hours and no scheduled times;
/// the classifier later tags them as non-working days.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSchedule`] when the entry's total hours are
/// outside `0..=24`.
pub fn apply_schedule(record: &mut DayRecord, schedules: &dyn ScheduleLookup) -> EngineResult<()> {
    let Some(entry) = schedules.resolve(&record.employee_id, record.iso_weekday, record.half_of_month)
    else {
        return Ok(());
    };

    let expected = hours_to_duration(entry.total_hours)
        .filter(|d| *d >= Duration::zero() && *d <= Duration::hours(24))
        .ok_or_else(|| EngineError::InvalidSchedule {
            employee_id: record.employee_id.clone(),
            iso_weekday: entry.iso_weekday,
            message: format!("total hours {} out of range", entry.total_hours),
        })?;

    record.scheduled_entry = Some(entry.entry_time);
    record.scheduled_exit = Some(entry.exit_time);
    record.crosses_midnight = entry.crosses_midnight;
    record.expected_hours = expected;
    record.expected_hours_original = expected;
    Ok(())
}
