//! Punch normalization.
//!
//! This module parses raw feed punches and builds the full
//! employee × date grid of [`DayRecord`]s, attaching each employee's punches
//! to the day they were recorded on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendancePeriod, DayRecord, PunchEvent, RawPunch, RosterEntry, RunWarning};

/// Timestamp layouts accepted from the punch feed.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Warning code for punches skipped because their timestamp did not parse.
pub const MALFORMED_PUNCH_WARNING: &str = "MALFORMED_PUNCH";

/// Parses a feed timestamp.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::parse_timestamp;
///
/// assert!(parse_timestamp("E100", "2025-03-03T18:04:00").is_ok());
/// assert!(parse_timestamp("E100", "2025-03-03 18:04").is_ok());
/// assert!(parse_timestamp("E100", "03/03/2025 18:04").is_err());
/// ```
pub fn parse_timestamp(employee_id: &str, value: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| EngineError::InvalidPunch {
            employee_id: employee_id.to_string(),
            value: value.to_string(),
        })
}

/// Parses raw punches, skipping the ones whose timestamp is malformed.
///
/// Every skipped punch is logged and reported as a [`RunWarning`]; it never
/// aborts the day or the run.
pub fn parse_raw_punches(raw: &[RawPunch]) -> (Vec<PunchEvent>, Vec<RunWarning>) {
    let mut events = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for punch in raw {
        match parse_timestamp(&punch.employee_id, &punch.timestamp) {
            Ok(timestamp) => events.push(PunchEvent {
                employee_id: punch.employee_id.clone(),
                display_name: punch.display_name.clone(),
                timestamp,
            }),
            Err(err) => {
                warn!(
                    employee_id = %punch.employee_id,
                    value = %punch.timestamp,
                    "Skipping malformed punch"
                );
                warnings.push(RunWarning::for_employee(
                    MALFORMED_PUNCH_WARNING,
                    err.to_string(),
                    &punch.employee_id,
                ));
            }
        }
    }

    (events, warnings)
}

/// Builds one [`DayRecord`] per employee and date in `period`.
///
/// Employees are every id seen in `events` plus every roster entry. Punches
/// are grouped on (employee, punch date), deduplicated, ordered ascending
/// and assigned to positional slots. The worked duration is the provisional
/// span between the first and last punch of the day.
///
/// The result is keyed by employee id; each employee's days are in
/// ascending date order.
pub fn normalize_punches(
    events: &[PunchEvent],
    roster: &[RosterEntry],
    period: &AttendancePeriod,
) -> BTreeMap<String, Vec<DayRecord>> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    let mut employees: BTreeSet<&str> = BTreeSet::new();
    let mut punches: HashMap<(&str, NaiveDate), BTreeSet<NaiveTime>> = HashMap::new();

    for event in events {
        employees.insert(event.employee_id.as_str());
        if !event.display_name.is_empty() {
            names
                .entry(event.employee_id.as_str())
                .or_insert(event.display_name.as_str());
        }
        if period.contains_date(event.date()) {
            punches
                .entry((event.employee_id.as_str(), event.date()))
                .or_default()
                .insert(event.time());
        }
    }
    for entry in roster {
        employees.insert(entry.employee_id.as_str());
        if !entry.display_name.is_empty() {
            names
                .entry(entry.employee_id.as_str())
                .or_insert(entry.display_name.as_str());
        }
    }

    let dates = period.dates();
    let mut grid = BTreeMap::new();

    for employee_id in employees {
        let display_name = names.get(employee_id).copied().unwrap_or(employee_id);
        let days: Vec<DayRecord> = dates
            .iter()
            .map(|date| {
                let mut record = DayRecord::new(employee_id, display_name, *date);
                if let Some(times) = punches.get(&(employee_id, *date)) {
                    record.punches = times.iter().copied().map(Some).collect();
                    if let (Some(first), Some(last)) = (times.first(), times.last()) {
                        record.set_worked_duration(*last - *first);
                    }
                }
                record
            })
            .collect();

        debug!(
            employee_id = %employee_id,
            days = days.len(),
            punch_days = days.iter().filter(|d| !d.punches.is_empty()).count(),
            "Normalized punches"
        );
        grid.insert(employee_id.to_string(), days);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn punch(employee_id: &str, name: &str, timestamp: &str) -> PunchEvent {
        PunchEvent {
            employee_id: employee_id.to_string(),
            display_name: name.to_string(),
            timestamp: parse_timestamp(employee_id, timestamp).unwrap(),
        }
    }

    fn period(start: &str, end: &str) -> AttendancePeriod {
        AttendancePeriod {
            start_date: make_date(start),
            end_date: make_date(end),
        }
    }

    #[test]
    fn test_grid_has_one_record_per_employee_and_date() {
        let events = vec![
            punch("E100", "Ana", "2025-03-03 09:00"),
            punch("E200", "Luis", "2025-03-05 18:00"),
        ];
        let grid = normalize_punches(&events, &[], &period("2025-03-03", "2025-03-06"));

        assert_eq!(grid.len(), 2);
        assert_eq!(grid["E100"].len(), 4);
        assert_eq!(grid["E200"].len(), 4);
        assert!(grid["E200"][0].punches.is_empty());
        assert_eq!(grid["E200"][2].punches, vec![Some(make_time("18:00"))]);
    }

    #[test]
    fn test_punches_are_sorted_and_deduplicated() {
        let events = vec![
            punch("E100", "Ana", "2025-03-03 17:05"),
            punch("E100", "Ana", "2025-03-03 08:58"),
            punch("E100", "Ana", "2025-03-03 17:05"),
            punch("E100", "Ana", "2025-03-03 12:30"),
        ];
        let grid = normalize_punches(&events, &[], &period("2025-03-03", "2025-03-03"));
        let day = &grid["E100"][0];

        assert_eq!(
            day.punches,
            vec![
                Some(make_time("08:58")),
                Some(make_time("12:30")),
                Some(make_time("17:05")),
            ]
        );
        assert_eq!(day.worked_duration, Duration::minutes(8 * 60 + 7));
    }

    #[test]
    fn test_punches_outside_period_are_dropped() {
        let events = vec![
            punch("E100", "Ana", "2025-03-02 09:00"),
            punch("E100", "Ana", "2025-03-03 09:00"),
        ];
        let grid = normalize_punches(&events, &[], &period("2025-03-03", "2025-03-03"));
        assert_eq!(grid["E100"].len(), 1);
        assert_eq!(grid["E100"][0].punches.len(), 1);
    }

    #[test]
    fn test_display_name_comes_from_first_occurrence() {
        let events = vec![
            punch("E100", "", "2025-03-03 09:00"),
            punch("E100", "Ana Ruiz", "2025-03-03 17:00"),
            punch("E100", "A. Ruiz", "2025-03-04 09:00"),
        ];
        let grid = normalize_punches(&events, &[], &period("2025-03-03", "2025-03-04"));
        assert!(grid["E100"].iter().all(|d| d.display_name == "Ana Ruiz"));
    }

    #[test]
    fn test_roster_adds_employees_without_punches() {
        let roster = vec![RosterEntry {
            employee_id: "E900".to_string(),
            display_name: "Marta".to_string(),
        }];
        let grid = normalize_punches(&[], &roster, &period("2025-03-03", "2025-03-04"));
        assert_eq!(grid["E900"].len(), 2);
        assert_eq!(grid["E900"][0].display_name, "Marta");
        assert!(grid["E900"].iter().all(|d| d.punches.is_empty()));
    }

    #[test]
    fn test_malformed_punch_is_skipped_with_warning() {
        let raw = vec![
            RawPunch {
                employee_id: "E100".to_string(),
                display_name: "Ana".to_string(),
                timestamp: "2025-03-03T09:00:00".to_string(),
            },
            RawPunch {
                employee_id: "E100".to_string(),
                display_name: "Ana".to_string(),
                timestamp: "---".to_string(),
            },
        ];
        let (events, warnings) = parse_raw_punches(&raw);
        assert_eq!(events.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, MALFORMED_PUNCH_WARNING);
        assert_eq!(warnings[0].employee_id.as_deref(), Some("E100"));
    }

    #[test]
    fn test_single_punch_has_zero_duration() {
        let events = vec![punch("E100", "Ana", "2025-03-03 09:00")];
        let grid = normalize_punches(&events, &[], &period("2025-03-03", "2025-03-03"));
        assert_eq!(grid["E100"][0].worked_duration, Duration::zero());
    }
}
