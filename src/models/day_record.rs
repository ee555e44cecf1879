//! The per-employee, per-date attendance record.
//!
//! A [`DayRecord`] is created empty by the punch normalizer and then
//! mutated in place by every later pipeline stage. Its final state is the
//! engine's output.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::duration::hms;
use super::punch::PunchSlot;
use super::schedule::MonthHalf;

/// Observation attached when a shift has an exit punch but no entry punch.
pub const MISSING_ENTRY_PUNCH: &str = "missing entry punch";
/// Observation attached when a shift has an entry punch but no exit punch.
pub const MISSING_EXIT_PUNCH: &str = "missing exit punch";
/// Observation attached when a computed duration had to be clamped to zero.
pub const NEGATIVE_DURATION_CLAMPED: &str = "negative duration clamped to zero";

/// The attendance outcome of a day.
///
/// Tags move forward through the pipeline:
/// `Unclassified` → one of the punctuality tags → `OnTimeHoursMet`
/// (forgiveness) → `JustifiedAbsence` → `NotHired`, with `NotHired`
/// overriding anything before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Not yet classified.
    #[default]
    Unclassified,
    /// No schedule applies to this weekday.
    NonWorkingDay,
    /// Scheduled, but no punch at all.
    Absent,
    /// Night shift with an exit punch but no entry punch.
    AbsentNightEntry,
    /// Arrived within the on-time tolerance.
    OnTime,
    /// Arrived late but worked at least the expected hours.
    OnTimeHoursMet,
    /// Arrived late, within the late tolerance.
    Late,
    /// Arrived too late for the day to count as attended.
    UnexcusedAbsence,
    /// An absence or lateness covered by approved leave.
    JustifiedAbsence,
    /// The day precedes the employee's hire date.
    NotHired,
    /// The day could not be reconciled.
    ProcessingError,
}

impl Classification {
    /// Returns true for the tags counted as absences in period totals.
    pub fn is_absence(self) -> bool {
        matches!(
            self,
            Classification::Absent
                | Classification::AbsentNightEntry
                | Classification::UnexcusedAbsence
        )
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Classification::Unclassified => "Unclassified",
            Classification::NonWorkingDay => "NonWorkingDay",
            Classification::Absent => "Absent",
            Classification::AbsentNightEntry => "AbsentNightEntry",
            Classification::OnTime => "OnTime",
            Classification::OnTimeHoursMet => "OnTime(HoursMet)",
            Classification::Late => "Late",
            Classification::UnexcusedAbsence => "UnexcusedAbsence",
            Classification::JustifiedAbsence => "JustifiedAbsence",
            Classification::NotHired => "NotHired",
            Classification::ProcessingError => "ProcessingError",
        };
        f.write_str(label)
    }
}

/// One employee's attendance on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub display_name: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// ISO weekday of `date`, 1 = Monday.
    pub iso_weekday: u32,
    /// Half of the month `date` falls in.
    pub half_of_month: MonthHalf,
    /// Positional punch slots, ascending once reconciled.
    pub punches: Vec<PunchSlot>,
    /// Time worked between the first and last punch.
    #[serde(with = "hms")]
    pub worked_duration: Duration,
    /// Informational break time between interior punch pairs.
    #[serde(with = "hms")]
    pub break_duration: Duration,
    /// Expected hours after leave adjustments.
    #[serde(with = "hms")]
    pub expected_hours: Duration,
    /// Expected hours as resolved from the schedule.
    #[serde(with = "hms")]
    pub expected_hours_original: Duration,
    /// Expected hours removed by leave.
    #[serde(with = "hms")]
    pub discounted_hours: Duration,
    /// Scheduled entry time, if a schedule applies.
    pub scheduled_entry: Option<NaiveTime>,
    /// Scheduled exit time, if a schedule applies.
    pub scheduled_exit: Option<NaiveTime>,
    /// Whether the scheduled shift ends on the next calendar day.
    pub crosses_midnight: bool,
    /// Set once the midnight reconciler has consolidated this day's shift.
    pub shift_consolidated: bool,
    /// The attendance outcome.
    pub classification: Classification,
    /// Minutes late against the scheduled entry.
    pub lateness_minutes: i64,
    /// Whether the employee left before the scheduled exit.
    pub early_departure: bool,
    /// Minutes left before the scheduled exit.
    pub early_departure_minutes: i64,
    /// Cumulative count of Late days for the employee up to this one, 0 if not Late.
    pub late_occurrence: u32,
    /// Whether this Late occurrence triggers a deduction.
    pub late_deduction: bool,
    /// Whether lateness was forgiven because hours were met.
    pub forgiven: bool,
    /// Whether a leave grant covers this day.
    pub has_leave: bool,
    /// Normalized leave type, if any.
    pub leave_type: Option<String>,
    /// Whether an absence on this day was justified by leave.
    pub justified: bool,
    /// Free-text notes collected while reconciling.
    pub observations: Vec<String>,
}

impl DayRecord {
    /// Creates an empty, unclassified record.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{Classification, DayRecord};
    /// use chrono::NaiveDate;
    ///
    /// let record = DayRecord::new("E100", "Ana Ruiz", NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    /// assert_eq!(record.iso_weekday, 1);
    /// assert!(record.punches.is_empty());
    /// assert_eq!(record.classification, Classification::Unclassified);
    /// ```
    pub fn new(employee_id: &str, display_name: &str, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            display_name: display_name.to_string(),
            date,
            iso_weekday: date.weekday().number_from_monday(),
            half_of_month: MonthHalf::of(date),
            punches: Vec::new(),
            worked_duration: Duration::zero(),
            break_duration: Duration::zero(),
            expected_hours: Duration::zero(),
            expected_hours_original: Duration::zero(),
            discounted_hours: Duration::zero(),
            scheduled_entry: None,
            scheduled_exit: None,
            crosses_midnight: false,
            shift_consolidated: false,
            classification: Classification::Unclassified,
            lateness_minutes: 0,
            early_departure: false,
            early_departure_minutes: 0,
            late_occurrence: 0,
            late_deduction: false,
            forgiven: false,
            has_leave: false,
            leave_type: None,
            justified: false,
            observations: Vec::new(),
        }
    }

    /// Returns the punches that are actually present, in slot order.
    pub fn present_punches(&self) -> Vec<NaiveTime> {
        self.punches.iter().flatten().copied().collect()
    }

    /// Returns the entry punch (slot 1).
    pub fn first_punch(&self) -> Option<NaiveTime> {
        self.punches.first().copied().flatten()
    }

    /// Returns true when a schedule applies to this day.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_entry.is_some()
    }

    /// Appends an observation unless the same text is already present.
    pub fn observe(&mut self, note: impl Into<String>) {
        let note = note.into();
        if !self.observations.contains(&note) {
            self.observations.push(note);
        }
    }

    /// Sets the worked duration, clamping negative values to zero.
    pub fn set_worked_duration(&mut self, duration: Duration) {
        if duration < Duration::zero() {
            warn!(
                employee_id = %self.employee_id,
                date = %self.date,
                seconds = duration.num_seconds(),
                "Negative worked duration clamped to zero"
            );
            self.observe(NEGATIVE_DURATION_CLAMPED);
            self.worked_duration = Duration::zero();
        } else {
            self.worked_duration = duration;
        }
    }

    /// Returns true once the record has been marked as failed.
    pub fn is_failed(&self) -> bool {
        self.classification == Classification::ProcessingError
    }

    /// Marks the record as failed with the given reason.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.classification = Classification::ProcessingError;
        self.late_occurrence = 0;
        self.late_deduction = false;
        self.observe(reason);
    }
}
