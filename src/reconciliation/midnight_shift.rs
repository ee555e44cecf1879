//! Midnight shift reconciliation.
//!
//! A shift scheduled across midnight leaves its exit punch on the next
//! calendar day. This module moves that punch back to the day the shift
//! started, so each night shift is reported on a single record with one
//! entry and one exit.
//!
//! For a shift starting on day D:
//! - the entry is the earliest punch on D;
//! - punches on D+1 up to the scheduled exit plus [`GRACE_MINUTES`] belong
//!   to the shift and are consumed from D+1;
//! - the exit is the latest consumed punch, or D's own latest punch when
//!   nothing qualifies on D+1;
//! - the worked duration wraps across midnight.
//!
//! D's slots are replaced by exactly `[entry, exit]`. Consolidated days are
//! flagged, so running the reconciler again changes nothing.

use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::config::GRACE_MINUTES;
use crate::models::{DayRecord, MISSING_ENTRY_PUNCH, MISSING_EXIT_PUNCH, seconds_of_day};

/// Worked time from `entry` to `exit` for a shift that may wrap past midnight.
///
/// When the exit time-of-day is not later than the entry, the exit is taken
/// to be on the next day.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::shift_duration;
/// use chrono::{Duration, NaiveTime};
///
/// let entry = NaiveTime::from_hms_opt(18, 4, 0).unwrap();
/// let exit = NaiveTime::from_hms_opt(2, 7, 0).unwrap();
/// assert_eq!(shift_duration(entry, exit), Duration::minutes(8 * 60 + 3));
/// ```
pub fn shift_duration(entry: NaiveTime, exit: NaiveTime) -> Duration {
    if seconds_of_day(exit) <= seconds_of_day(entry) {
        exit - entry + Duration::hours(24)
    } else {
        exit - entry
    }
}

/// Reconciles the cross-midnight shifts of one employee.
///
/// `days` must hold a single employee's records in ascending date order.
/// Days that do not cross midnight are left as they are, except when a
/// previous night shift consumes some of their punches.
pub fn reconcile_midnight_shifts(days: &mut [DayRecord]) {
    for index in 0..days.len() {
        let day = &days[index];
        if !day.crosses_midnight || day.shift_consolidated || day.is_failed() {
            continue;
        }

        let has_next = days
            .get(index + 1)
            .is_some_and(|next| day.date.succ_opt() == Some(next.date) && !next.is_failed());

        if has_next {
            let (current, rest) = days.split_at_mut(index + 1);
            consolidate_shift(&mut current[index], &mut rest[0]);
        } else {
            settle_last_day(&mut days[index]);
        }
    }
}

/// Consolidates the shift starting on `day` using the punches of `next`.
fn consolidate_shift(day: &mut DayRecord, next: &mut DayRecord) {
    let Some(scheduled_exit) = day.scheduled_exit else {
        return;
    };
    let limit = seconds_of_day(scheduled_exit) + GRACE_MINUTES * 60;

    let mut own = day.present_punches();
    own.sort();
    let mut following = next.present_punches();
    following.sort();

    let (consumed, remaining): (Vec<NaiveTime>, Vec<NaiveTime>) = following
        .into_iter()
        .partition(|t| seconds_of_day(*t) <= limit);

    let entry = own.first().copied();
    let exit = match consumed.last() {
        Some(last) => Some(*last),
        None if own.len() >= 2 => own.last().copied(),
        None => None,
    };

    day.punches = match (entry, exit) {
        (entry, Some(exit)) => vec![entry, Some(exit)],
        (Some(entry), None) => vec![Some(entry)],
        (None, None) => Vec::new(),
    };

    match (entry, exit) {
        (Some(entry), Some(exit)) => day.set_worked_duration(shift_duration(entry, exit)),
        (None, Some(_)) => {
            day.observe(MISSING_ENTRY_PUNCH);
            day.worked_duration = Duration::zero();
        }
        (Some(_), None) => {
            day.observe(MISSING_EXIT_PUNCH);
            day.worked_duration = Duration::zero();
        }
        (None, None) => day.worked_duration = Duration::zero(),
    }
    day.shift_consolidated = true;

    if !consumed.is_empty() {
        debug!(
            employee_id = %day.employee_id,
            date = %day.date,
            moved = consumed.len(),
            from = %next.date,
            "Reassigned next-day punches to night shift"
        );
        next.punches = remaining.iter().copied().map(Some).collect();
        match (remaining.first(), remaining.last()) {
            (Some(first), Some(last)) if remaining.len() >= 2 => {
                next.set_worked_duration(*last - *first)
            }
            _ => next.worked_duration = Duration::zero(),
        }
    }
}

/// Settles a night shift on the last day of the period.
///
/// There is no next day to read from, so the punches stay as they are and
/// the duration spans only what was recorded on the day itself.
fn settle_last_day(day: &mut DayRecord) {
    let mut own = day.present_punches();
    own.sort();
    match (own.first(), own.last()) {
        (Some(first), Some(last)) if own.len() >= 2 => day.set_worked_duration(*last - *first),
        _ => day.worked_duration = Duration::zero(),
    }
}
