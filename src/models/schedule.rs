//! Work schedule models and the immutable schedule snapshot.
//!
//! Schedules are owned by an external collaborator. The engine receives a
//! snapshot built once per run and only ever reads from it.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which half of the month a date falls in.
///
/// Some schedules rotate twice a month, so an entry may be restricted to
/// days 1–15 or to day 16 onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthHalf {
    /// Days 1 through 15.
    First,
    /// Day 16 through the end of the month.
    Second,
}

impl MonthHalf {
    /// Returns the half of the month `date` belongs to.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::MonthHalf;
    /// use chrono::NaiveDate;
    ///
    /// assert_eq!(MonthHalf::of(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()), MonthHalf::First);
    /// assert_eq!(MonthHalf::of(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()), MonthHalf::Second);
    /// ```
    pub fn of(date: NaiveDate) -> Self {
        if date.day() <= 15 {
            MonthHalf::First
        } else {
            MonthHalf::Second
        }
    }
}

/// A scheduled shift for one employee on one ISO weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The employee this entry belongs to.
    pub employee_id: String,
    /// ISO weekday, 1 = Monday through 7 = Sunday.
    pub iso_weekday: u32,
    /// Restricts the entry to one half of the month; `None` applies to both.
    #[serde(default)]
    pub half_of_month: Option<MonthHalf>,
    /// Scheduled entry time-of-day.
    pub entry_time: NaiveTime,
    /// Scheduled exit time-of-day.
    pub exit_time: NaiveTime,
    /// Whether the shift ends on the calendar day after it starts.
    pub crosses_midnight: bool,
    /// Expected hours for the shift.
    pub total_hours: Decimal,
}

/// Resolves the schedule that applies to an employee on a given day.
///
/// Implementations must be pure: the same arguments always give the same
/// answer for the lifetime of a run.
pub trait ScheduleLookup: Sync {
    /// Returns the entry for `employee_id` on `iso_weekday` in `half`, if any.
    fn resolve(&self, employee_id: &str, iso_weekday: u32, half: MonthHalf)
    -> Option<&ScheduleEntry>;
}

/// An immutable snapshot of every schedule entry known for a run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{MonthHalf, ScheduleEntry, ScheduleLookup, ScheduleSnapshot};
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let snapshot = ScheduleSnapshot::new(vec![ScheduleEntry {
///     employee_id: "E100".to_string(),
///     iso_weekday: 1,
///     half_of_month: None,
///     entry_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     exit_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
///     crosses_midnight: true,
///     total_hours: Decimal::new(8, 0),
/// }]);
///
/// assert!(snapshot.resolve("E100", 1, MonthHalf::Second).is_some());
/// assert!(snapshot.resolve("E100", 2, MonthHalf::First).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    entries: HashMap<(String, u32), Vec<ScheduleEntry>>,
}

impl ScheduleSnapshot {
    /// Builds a snapshot from a list of entries.
    ///
    /// When two entries share the same employee, weekday and half, the
    /// later one wins.
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        let mut map: HashMap<(String, u32), Vec<ScheduleEntry>> = HashMap::new();
        for entry in entries {
            let slot = map
                .entry((entry.employee_id.clone(), entry.iso_weekday))
                .or_default();
            slot.retain(|existing| existing.half_of_month != entry.half_of_month);
            slot.push(entry);
        }
        Self { entries: map }
    }

    /// Returns the number of entries held.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true when the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScheduleLookup for ScheduleSnapshot {
    fn resolve(
        &self,
        employee_id: &str,
        iso_weekday: u32,
        half: MonthHalf,
    ) -> Option<&ScheduleEntry> {
        let candidates = self.entries.get(&(employee_id.to_string(), iso_weekday))?;
        candidates
            .iter()
            .find(|e| e.half_of_month == Some(half))
            .or_else(|| candidates.iter().find(|e| e.half_of_month.is_none()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn entry(weekday: u32, half: Option<MonthHalf>, entry_time: &str) -> ScheduleEntry {
        ScheduleEntry {
            employee_id: "E100".to_string(),
            iso_weekday: weekday,
            half_of_month: half,
            entry_time: make_time(entry_time),
            exit_time: make_time("17:00"),
            crosses_midnight: false,
            total_hours: Decimal::new(8, 0),
        }
    }

    #[test]
    fn test_exact_half_wins_over_generic_entry() {
        let snapshot = ScheduleSnapshot::new(vec![
            entry(1, None, "09:00"),
            entry(1, Some(MonthHalf::Second), "10:00"),
        ]);

        let first = snapshot.resolve("E100", 1, MonthHalf::First).unwrap();
        assert_eq!(first.entry_time, make_time("09:00"));

        let second = snapshot.resolve("E100", 1, MonthHalf::Second).unwrap();
        assert_eq!(second.entry_time, make_time("10:00"));
    }

    #[test]
    fn test_half_restricted_entry_does_not_leak() {
        let snapshot = ScheduleSnapshot::new(vec![entry(2, Some(MonthHalf::First), "08:00")]);
        assert!(snapshot.resolve("E100", 2, MonthHalf::First).is_some());
        assert!(snapshot.resolve("E100", 2, MonthHalf::Second).is_none());
    }

    #[test]
    fn test_duplicate_entry_replaces_earlier_one() {
        let snapshot = ScheduleSnapshot::new(vec![entry(3, None, "08:00"), entry(3, None, "07:00")]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.resolve("E100", 3, MonthHalf::First).unwrap().entry_time,
            make_time("07:00")
        );
    }

    #[test]
    fn test_unknown_employee_resolves_to_none() {
        let snapshot = ScheduleSnapshot::new(vec![entry(1, None, "09:00")]);
        assert!(snapshot.resolve("E999", 1, MonthHalf::First).is_none());
    }

    #[test]
    fn test_schedule_entry_deserializes_from_yaml() {
        let yaml = r#"
employee_id: E100
iso_weekday: 5
entry_time: "18:00:00"
exit_time: "02:00:00"
crosses_midnight: true
total_hours: 8
"#;
        let entry: ScheduleEntry = serde_yaml::from_str(yaml).unwrap();
        assert!(entry.crosses_midnight);
        assert_eq!(entry.half_of_month, None);
        assert_eq!(entry.total_hours, Decimal::new(8, 0));
    }
}
