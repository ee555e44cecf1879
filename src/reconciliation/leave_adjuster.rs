//! Leave adjustment.
//!
//! Flags days covered by approved leave and reduces their expected hours
//! according to the grant's policy action.

use chrono::Duration;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayRecord, LeaveBook, LeaveGrant, PolicyAction, hours_to_duration};

/// Expected hours left after applying `grant` to `expected`.
///
/// # Errors
///
/// Returns [`EngineError::ProcessingError`] when a prorated grant carries
/// negative or unrepresentable hours.
pub fn adjusted_expected_hours(
    record: &DayRecord,
    grant: &LeaveGrant,
    expected: Duration,
) -> EngineResult<Duration> {
    let adjusted = match grant.policy_action {
        PolicyAction::NoAdjust => expected,
        PolicyAction::AdjustToZero if grant.half_day => expected / 2,
        PolicyAction::AdjustToZero => Duration::zero(),
        PolicyAction::Prorate => match grant.hours {
            Some(hours) => {
                let granted = hours_to_duration(hours)
                    .filter(|d| *d >= Duration::zero())
                    .ok_or_else(|| EngineError::ProcessingError {
                        employee_id: record.employee_id.clone(),
                        date: record.date,
                        message: format!("invalid prorated leave hours {}", hours),
                    })?;
                (expected - granted).max(Duration::zero())
            }
            None if grant.half_day => expected / 2,
            None => Duration::zero(),
        },
    };
    Ok(adjusted)
}

/// Applies the leave grant covering a day, if there is one.
pub fn apply_leave(record: &mut DayRecord, leaves: &LeaveBook) -> EngineResult<()> {
    let Some(grant) = leaves.get(&record.employee_id, record.date) else {
        return Ok(());
    };

    let expected = record.expected_hours;
    let adjusted = adjusted_expected_hours(record, grant, expected)?;

    record.has_leave = true;
    record.leave_type = Some(grant.normalized_type.clone());
    record.expected_hours = adjusted;
    record.discounted_hours = expected - adjusted;

    debug!(
        employee_id = %record.employee_id,
        date = %record.date,
        leave_type = %grant.normalized_type,
        policy = ?grant.policy_action,
        discounted_minutes = record.discounted_hours.num_minutes(),
        "Applied leave"
    );
    Ok(())
}
