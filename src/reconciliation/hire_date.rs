//! Hire date adjustment.
//!
//! Days before an employee was hired are neither worked nor missed. This
//! runs last and overrides every earlier tag, including a processing
//! error raised for the day.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{Classification, DayRecord, NOT_HIRED_LEAVE_TYPE};

/// Tags a day as NotHired when it precedes the employee's hire date.
///
/// Returns whether the day was overridden.
pub fn apply_hire_date(record: &mut DayRecord, hire_dates: &HashMap<String, NaiveDate>) -> bool {
    let Some(hired_on) = hire_dates.get(&record.employee_id) else {
        return false;
    };
    if record.date >= *hired_on {
        return false;
    }

    record.classification = Classification::NotHired;
    record.leave_type = Some(NOT_HIRED_LEAVE_TYPE.to_string());
    record.expected_hours = Duration::zero();
    record.lateness_minutes = 0;
    record.early_departure = false;
    record.early_departure_minutes = 0;
    record.forgiven = false;
    record.justified = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn hire_dates() -> HashMap<String, NaiveDate> {
        HashMap::from([("E100".to_string(), make_date("2025-03-05"))])
    }

    fn absent_day(date: &str) -> DayRecord {
        let mut record = DayRecord::new("E100", "Ana", make_date(date));
        record.classification = Classification::Absent;
        record.expected_hours = Duration::hours(8);
        record
    }

    #[test]
    fn test_day_before_hire_is_not_hired() {
        let mut record = absent_day("2025-03-04");
        assert!(apply_hire_date(&mut record, &hire_dates()));
        assert_eq!(record.classification, Classification::NotHired);
        assert_eq!(record.leave_type.as_deref(), Some(NOT_HIRED_LEAVE_TYPE));
        assert_eq!(record.expected_hours, Duration::zero());
    }

    #[test]
    fn test_hire_date_itself_is_kept() {
        let mut record = absent_day("2025-03-05");
        assert!(!apply_hire_date(&mut record, &hire_dates()));
        assert_eq!(record.classification, Classification::Absent);
    }

    #[test]
    fn test_override_clears_forgiveness() {
        let mut record = absent_day("2025-03-01");
        record.classification = Classification::OnTimeHoursMet;
        record.forgiven = true;
        apply_hire_date(&mut record, &hire_dates());
        assert_eq!(record.classification, Classification::NotHired);
        assert!(!record.forgiven);
    }

    #[test]
    fn test_override_clears_processing_error() {
        let mut record = absent_day("2025-03-03");
        record.mark_failed("total hours 30 out of range");
        assert!(apply_hire_date(&mut record, &hire_dates()));
        assert_eq!(record.classification, Classification::NotHired);
        assert!(!record.is_failed());
    }

    #[test]
    fn test_unknown_hire_date_changes_nothing() {
        let mut record = absent_day("2025-03-01");
        record.employee_id = "E999".to_string();
        assert!(!apply_hire_date(&mut record, &hire_dates()));
    }
}
