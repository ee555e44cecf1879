//! Break calculation.
//!
//! Breaks are inferred from the interior punches of a day: with punches
//! sorted, the pairs (2nd, 3rd), (4th, 5th), … are time away from work.
//! The result is informational; worked duration is never reduced here.

use chrono::Duration;

use crate::models::DayRecord;

/// Minimum punches needed before any break can be inferred.
const MIN_PUNCHES_FOR_BREAK: usize = 4;

/// Computes the total break time for the given punches.
///
/// Pairs `noise_minutes` apart or closer are ignored.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::total_break;
/// use chrono::{Duration, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let punches = vec![t(8, 0), t(12, 0), t(13, 0), t(18, 0)];
/// assert_eq!(total_break(&punches, 5), Duration::hours(1));
/// ```
pub fn total_break(punches: &[chrono::NaiveTime], noise_minutes: i64) -> Duration {
    if punches.len() < MIN_PUNCHES_FOR_BREAK {
        return Duration::zero();
    }
    let mut sorted = punches.to_vec();
    sorted.sort();

    let noise = Duration::minutes(noise_minutes);
    sorted[1..]
        .chunks_exact(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > noise)
        .fold(Duration::zero(), |total, gap| total + gap)
}

/// Populates the break duration of a day.
pub fn calculate_break(record: &mut DayRecord, noise_minutes: i64) {
    record.break_duration = total_break(&record.present_punches(), noise_minutes);
}
