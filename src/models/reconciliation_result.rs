//! Reconciliation result models.
//!
//! This module contains the [`ReconciliationResult`] returned by a run and
//! the per-employee [`EmployeeSummary`] handed to report renderers.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::day_record::{Classification, DayRecord};
use super::duration::duration_to_hours;
use super::period::AttendancePeriod;

/// A warning generated during a run.
///
/// Warnings describe input that was skipped or rows that failed, without
/// stopping the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The employee concerned, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl RunWarning {
    /// Creates a warning about one employee.
    pub fn for_employee(
        code: impl Into<String>,
        message: impl Into<String>,
        employee_id: &str,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            employee_id: Some(employee_id.to_string()),
        }
    }
}

/// Period totals for one employee.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Classification, DayRecord, EmployeeSummary};
/// use chrono::{Duration, NaiveDate};
///
/// let mut day = DayRecord::new("E100", "Ana", NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
/// day.classification = Classification::Late;
/// day.worked_duration = Duration::hours(8);
///
/// let summary = EmployeeSummary::from_records("E100", &[day]);
/// assert_eq!(summary.late_days, 1);
/// assert_eq!(summary.worked_hours, rust_decimal::Decimal::new(8, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub display_name: String,
    /// Days in the period.
    pub total_days: u32,
    /// Days with a schedule, excluding days before hire.
    pub scheduled_days: u32,
    /// Days classified on time, forgiven days included.
    pub on_time_days: u32,
    /// Days whose lateness was forgiven.
    pub forgiven_days: u32,
    /// Days still late at the end of the run.
    pub late_days: u32,
    /// Late days that triggered a deduction.
    pub late_deductions: u32,
    /// Unjustified absences of any kind.
    pub absence_days: u32,
    /// Absences covered by leave.
    pub justified_days: u32,
    /// Days without a schedule.
    pub non_working_days: u32,
    /// Days before the hire date.
    pub not_hired_days: u32,
    /// Days that failed to reconcile.
    pub failed_days: u32,
    /// Days with an early departure.
    pub early_departures: u32,
    /// Total worked hours.
    pub worked_hours: Decimal,
    /// Total expected hours after leave.
    pub expected_hours: Decimal,
    /// Total informational break hours.
    pub break_hours: Decimal,
}

impl EmployeeSummary {
    /// Aggregates the records of one employee.
    pub fn from_records(employee_id: &str, records: &[DayRecord]) -> Self {
        let mut summary = Self {
            employee_id: employee_id.to_string(),
            display_name: records
                .iter()
                .find(|r| r.employee_id == employee_id)
                .map(|r| r.display_name.clone())
                .unwrap_or_else(|| employee_id.to_string()),
            total_days: 0,
            scheduled_days: 0,
            on_time_days: 0,
            forgiven_days: 0,
            late_days: 0,
            late_deductions: 0,
            absence_days: 0,
            justified_days: 0,
            non_working_days: 0,
            not_hired_days: 0,
            failed_days: 0,
            early_departures: 0,
            worked_hours: Decimal::ZERO,
            expected_hours: Decimal::ZERO,
            break_hours: Decimal::ZERO,
        };

        let mut worked = Duration::zero();
        let mut expected = Duration::zero();
        let mut breaks = Duration::zero();

        for record in records.iter().filter(|r| r.employee_id == employee_id) {
            summary.total_days += 1;
            if record.is_scheduled() && record.classification != Classification::NotHired {
                summary.scheduled_days += 1;
            }
            match record.classification {
                Classification::OnTime => summary.on_time_days += 1,
                Classification::OnTimeHoursMet => {
                    summary.on_time_days += 1;
                    summary.forgiven_days += 1;
                }
                Classification::Late => summary.late_days += 1,
                Classification::JustifiedAbsence => summary.justified_days += 1,
                Classification::NonWorkingDay => summary.non_working_days += 1,
                Classification::NotHired => summary.not_hired_days += 1,
                Classification::ProcessingError => summary.failed_days += 1,
                c if c.is_absence() => summary.absence_days += 1,
                _ => {}
            }
            if record.late_deduction {
                summary.late_deductions += 1;
            }
            if record.early_departure {
                summary.early_departures += 1;
            }
            worked += record.worked_duration;
            expected += record.expected_hours;
            breaks += record.break_duration;
        }

        summary.worked_hours = duration_to_hours(worked);
        summary.expected_hours = duration_to_hours(expected);
        summary.break_hours = duration_to_hours(breaks);
        summary
    }
}

/// The complete result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The reconciled period.
    pub period: AttendancePeriod,
    /// One record per employee and date, ordered by employee then date.
    pub records: Vec<DayRecord>,
    /// Period totals per employee, ordered by employee.
    pub summaries: Vec<EmployeeSummary>,
    /// Skipped input and failed rows.
    pub warnings: Vec<RunWarning>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

impl ReconciliationResult {
    /// Looks up the record for an employee and date.
    pub fn record(&self, employee_id: &str, date: chrono::NaiveDate) -> Option<&DayRecord> {
        self.records
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date)
    }
}
