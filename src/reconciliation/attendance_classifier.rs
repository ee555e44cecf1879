//! Attendance classification.
//!
//! This module provides the two independent checks made against a day's
//! schedule:
//! - punctuality, which assigns the day's initial classification tag;
//! - early departure, which flags leaving before the scheduled exit.

use chrono::{NaiveTime, Timelike};

use crate::config::EngineConfig;
use crate::models::{Classification, DayRecord, seconds_of_day};

const SECONDS_PER_DAY: i64 = 24 * 3600;
const HALF_DAY_SECONDS: i64 = 12 * 3600;

/// Minutes between the scheduled entry and the actual first punch.
///
/// Positive values are late arrivals. For shifts crossing midnight, a
/// morning punch against an afternoon/evening schedule is read as a
/// next-day arrival. Deltas below -12h wrap forward one day.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::arrival_delta_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(arrival_delta_minutes(t(9, 0), t(9, 16), false), 16);
/// assert_eq!(arrival_delta_minutes(t(9, 0), t(8, 50), false), -10);
/// assert_eq!(arrival_delta_minutes(t(22, 0), t(0, 30), true), 150);
/// ```
pub fn arrival_delta_minutes(scheduled: NaiveTime, punch: NaiveTime, crosses_midnight: bool) -> i64 {
    let mut scheduled_seconds = seconds_of_day(scheduled);
    if crosses_midnight && scheduled.hour() >= 12 && punch.hour() < 12 {
        scheduled_seconds -= SECONDS_PER_DAY;
    }
    let mut delta = seconds_of_day(punch) - scheduled_seconds;
    if delta < -HALF_DAY_SECONDS {
        delta += SECONDS_PER_DAY;
    }
    delta.div_euclid(60)
}

/// Assigns the punctuality tag of a day.
pub fn classify_punctuality(record: &mut DayRecord, config: &EngineConfig) {
    record.lateness_minutes = 0;

    let Some(scheduled_entry) = record.scheduled_entry else {
        record.classification = Classification::NonWorkingDay;
        return;
    };

    let Some(first_punch) = record.first_punch() else {
        record.classification = if record.crosses_midnight && !record.present_punches().is_empty() {
            Classification::AbsentNightEntry
        } else {
            Classification::Absent
        };
        return;
    };

    let delta = arrival_delta_minutes(scheduled_entry, first_punch, record.crosses_midnight);
    record.classification = if delta <= config.on_time_minutes {
        Classification::OnTime
    } else if delta <= config.late_max_minutes {
        Classification::Late
    } else {
        Classification::UnexcusedAbsence
    };
    if record.classification != Classification::OnTime {
        record.lateness_minutes = delta;
    }
}

/// Flags a day whose last punch is before the scheduled exit.
///
/// Needs a scheduled exit and at least two punches. On night shifts,
/// punches before noon count as next-day times when picking the last one.
pub fn detect_early_departure(record: &mut DayRecord, config: &EngineConfig) {
    record.early_departure = false;
    record.early_departure_minutes = 0;

    let Some(scheduled_exit) = record.scheduled_exit else {
        return;
    };
    let punches = record.present_punches();
    if punches.len() < 2 {
        return;
    }

    let crosses_midnight = record.crosses_midnight;
    let virtual_seconds = |time: NaiveTime| {
        let seconds = seconds_of_day(time);
        if crosses_midnight && time.hour() < 12 {
            seconds + SECONDS_PER_DAY
        } else {
            seconds
        }
    };

    let Some(last_seconds) = punches.iter().map(|p| virtual_seconds(*p)).max() else {
        return;
    };
    let mut delta = virtual_seconds(scheduled_exit) - last_seconds;
    while delta > HALF_DAY_SECONDS {
        delta -= SECONDS_PER_DAY;
    }
    while delta < -HALF_DAY_SECONDS {
        delta += SECONDS_PER_DAY;
    }

    let minutes = delta.div_euclid(60);
    if minutes > config.early_departure_minutes {
        record.early_departure = true;
        record.early_departure_minutes = minutes;
    }
}

/// Runs both checks on a day.
pub fn classify_day(record: &mut DayRecord, config: &EngineConfig) {
    classify_punctuality(record, config);
    detect_early_departure(record, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn scheduled_day(entry: &str, exit: &str, crosses: bool, punches: Vec<Option<&str>>) -> DayRecord {
        let mut record = DayRecord::new("E100", "Ana", NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        record.scheduled_entry = Some(make_time(entry));
        record.scheduled_exit = Some(make_time(exit));
        record.crosses_midnight = crosses;
        record.punches = punches.into_iter().map(|p| p.map(make_time)).collect();
        record
    }

    fn classify(punch: &str) -> DayRecord {
        let mut record = scheduled_day("09:00", "17:00", false, vec![Some(punch), Some("17:00")]);
        classify_day(&mut record, &EngineConfig::default());
        record
    }

    #[test]
    fn test_tardiness_tier_boundaries() {
        assert_eq!(classify("09:15").classification, Classification::OnTime);
        assert_eq!(classify("09:16").classification, Classification::Late);
        assert_eq!(classify("10:00").classification, Classification::Late);
        assert_eq!(classify("10:01").classification, Classification::UnexcusedAbsence);
    }

    #[test]
    fn test_lateness_minutes_recorded_for_late_days_only() {
        assert_eq!(classify("09:10").lateness_minutes, 0);
        assert_eq!(classify("09:40").lateness_minutes, 40);
        assert_eq!(classify("10:30").lateness_minutes, 90);
    }

    #[test]
    fn test_seconds_do_not_push_a_boundary_over() {
        let mut record = DayRecord::new("E100", "Ana", NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        record.scheduled_entry = Some(make_time("09:00"));
        record.punches = vec![Some(NaiveTime::from_hms_opt(9, 15, 45).unwrap())];
        classify_punctuality(&mut record, &EngineConfig::default());
        assert_eq!(record.classification, Classification::OnTime);
    }

    #[test]
    fn test_early_arrival_is_on_time() {
        assert_eq!(classify("08:30").classification, Classification::OnTime);
    }

    #[test]
    fn test_unscheduled_day_is_non_working() {
        let mut record = DayRecord::new("E100", "Ana", NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
        record.punches = vec![Some(make_time("10:00"))];
        classify_day(&mut record, &EngineConfig::default());
        assert_eq!(record.classification, Classification::NonWorkingDay);
        assert!(!record.early_departure);
    }

    #[test]
    fn test_no_punch_is_absent() {
        let mut record = scheduled_day("09:00", "17:00", false, vec![]);
        classify_day(&mut record, &EngineConfig::default());
        assert_eq!(record.classification, Classification::Absent);
    }

    #[test]
    fn test_night_shift_with_exit_only_is_absent_night_entry() {
        let mut record = scheduled_day("18:00", "02:00", true, vec![None, Some("02:07")]);
        classify_day(&mut record, &EngineConfig::default());
        assert_eq!(record.classification, Classification::AbsentNightEntry);
    }

    #[test]
    fn test_night_shift_arrival_after_midnight() {
        let mut record = scheduled_day("22:00", "06:00", true, vec![Some("00:30"), Some("06:00")]);
        classify_day(&mut record, &EngineConfig::default());
        assert_eq!(record.classification, Classification::UnexcusedAbsence);
        assert_eq!(record.lateness_minutes, 150);
    }

    #[test]
    fn test_night_shift_on_time_arrival() {
        let mut record = scheduled_day("18:00", "02:00", true, vec![Some("18:04"), Some("02:07")]);
        classify_day(&mut record, &EngineConfig::default());
        assert_eq!(record.classification, Classification::OnTime);
        assert!(!record.early_departure);
    }

    #[test]
    fn test_early_departure_day_shift() {
        let mut record = scheduled_day("09:00", "17:00", false, vec![Some("09:00"), Some("16:44")]);
        classify_day(&mut record, &EngineConfig::default());
        assert!(record.early_departure);
        assert_eq!(record.early_departure_minutes, 16);

        let mut record = scheduled_day("09:00", "17:00", false, vec![Some("09:00"), Some("16:45")]);
        classify_day(&mut record, &EngineConfig::default());
        assert!(!record.early_departure);
    }

    #[test]
    fn test_early_departure_night_shift_uses_virtual_time() {
        // Leaving at 23:30 on an 18:00-02:00 shift is 150 minutes early
        let mut record = scheduled_day("18:00", "02:00", true, vec![Some("18:00"), Some("23:30")]);
        classify_day(&mut record, &EngineConfig::default());
        assert!(record.early_departure);
        assert_eq!(record.early_departure_minutes, 150);

        // Leaving at 01:50 is within tolerance
        let mut record = scheduled_day("18:00", "02:00", true, vec![Some("18:00"), Some("01:50")]);
        classify_day(&mut record, &EngineConfig::default());
        assert!(!record.early_departure);
    }

    #[test]
    fn test_single_punch_skips_early_departure() {
        let mut record = scheduled_day("09:00", "17:00", false, vec![Some("09:00")]);
        classify_day(&mut record, &EngineConfig::default());
        assert!(!record.early_departure);
    }
}
