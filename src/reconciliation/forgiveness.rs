//! Forgiveness of lateness when hours are met.
//!
//! A Late day (and, when enabled, an UnexcusedAbsence day) whose worked
//! time reaches the expected hours is reclassified as on time.

use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{Classification, DayRecord};

/// Returns true when the day's tag may be forgiven under `config`.
fn is_forgivable(classification: Classification, config: &EngineConfig) -> bool {
    match classification {
        Classification::Late => true,
        Classification::UnexcusedAbsence => config.forgive_unexcused_absence,
        _ => false,
    }
}

/// Forgives a day if it qualifies. Returns whether it was forgiven.
///
/// Callers must rebuild the Late counters afterwards.
pub fn apply_forgiveness(record: &mut DayRecord, config: &EngineConfig) -> bool {
    if !is_forgivable(record.classification, config)
        || record.worked_duration < record.expected_hours
    {
        return false;
    }

    debug!(
        employee_id = %record.employee_id,
        date = %record.date,
        from = %record.classification,
        lateness_minutes = record.lateness_minutes,
        "Forgave lateness, expected hours met"
    );
    record.classification = Classification::OnTimeHoursMet;
    record.lateness_minutes = 0;
    record.forgiven = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(classification: Classification, worked_hours: i64, expected_hours: i64) -> DayRecord {
        let mut record = DayRecord::new("E100", "Ana", NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        record.classification = classification;
        record.lateness_minutes = 30;
        record.worked_duration = Duration::hours(worked_hours);
        record.expected_hours = Duration::hours(expected_hours);
        record
    }

    #[test]
    fn test_late_day_meeting_hours_is_forgiven() {
        let mut record = day(Classification::Late, 8, 8);
        assert!(apply_forgiveness(&mut record, &EngineConfig::default()));
        assert_eq!(record.classification, Classification::OnTimeHoursMet);
        assert_eq!(record.lateness_minutes, 0);
        assert!(record.forgiven);
    }

    #[test]
    fn test_late_day_short_of_hours_stays_late() {
        let mut record = day(Classification::Late, 7, 8);
        assert!(!apply_forgiveness(&mut record, &EngineConfig::default()));
        assert_eq!(record.classification, Classification::Late);
        assert_eq!(record.lateness_minutes, 30);
        assert!(!record.forgiven);
    }

    #[test]
    fn test_half_day_leave_makes_lateness_forgivable() {
        let mut record = day(Classification::Late, 5, 4);
        assert!(apply_forgiveness(&mut record, &EngineConfig::default()));
    }

    #[test]
    fn test_unexcused_absence_needs_the_switch() {
        let mut record = day(Classification::UnexcusedAbsence, 9, 8);
        assert!(!apply_forgiveness(&mut record, &EngineConfig::default()));
        assert_eq!(record.classification, Classification::UnexcusedAbsence);

        let config = EngineConfig {
            forgive_unexcused_absence: true,
            ..EngineConfig::default()
        };
        assert!(apply_forgiveness(&mut record, &config));
        assert_eq!(record.classification, Classification::OnTimeHoursMet);
    }

    #[test]
    fn test_other_tags_are_never_forgiven() {
        for tag in [Classification::Absent, Classification::OnTime, Classification::NonWorkingDay] {
            let mut record = day(tag, 0, 0);
            assert!(!apply_forgiveness(&mut record, &EngineConfig::default()));
            assert_eq!(record.classification, tag);
        }
    }
}
