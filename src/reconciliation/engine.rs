//! The attendance reconciliation engine.
//!
//! [`AttendanceEngine`] composes the pipeline stages in their fixed order:
//!
//! 1. punch normalization (employee × date grid)
//! 2. schedule resolution
//! 3. midnight shift reconciliation
//! 4. break calculation
//! 5. attendance classification
//! 6. leave adjustment
//! 7. forgiveness
//! 8. absence justification
//! 9. hire date adjustment
//!
//! Stages 2–9 need only one employee's days, so employees are processed
//! independently, optionally on a bounded pool of worker threads. Results
//! are merged by employee id, so processing order never affects output.

use std::collections::{BTreeMap, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendancePeriod, DayRecord, EmployeeSummary, LeaveBook, RawPunch, ReconciliationResult,
    RosterEntry, RunWarning, ScheduleLookup,
};

use super::absence_reclassifier::justify_absence;
use super::attendance_classifier::classify_day;
use super::break_calculator::calculate_break;
use super::forgiveness::apply_forgiveness;
use super::hire_date::apply_hire_date;
use super::late_counter::recompute_late_counters;
use super::leave_adjuster::apply_leave;
use super::midnight_shift::reconcile_midnight_shifts;
use super::punch_normalizer::{normalize_punches, parse_raw_punches};
use super::schedule_resolution::apply_schedule;

/// Warning code for rows marked as processing errors.
pub const ROW_FAILED_WARNING: &str = "ROW_FAILED";

/// Pre-fetched, read-only lookups shared by every employee.
#[derive(Clone, Copy)]
pub struct EngineContext<'a> {
    /// Schedule lookup for the run.
    pub schedules: &'a dyn ScheduleLookup,
    /// Approved leave for the run.
    pub leaves: &'a LeaveBook,
    /// Hire date per employee.
    pub hire_dates: &'a HashMap<String, NaiveDate>,
}

/// Everything a run consumes.
#[derive(Clone, Copy)]
pub struct EngineInput<'a> {
    /// The period to reconcile.
    pub period: AttendancePeriod,
    /// Raw punches from the feed.
    pub punches: &'a [RawPunch],
    /// Employees to include even without punches.
    pub roster: &'a [RosterEntry],
    /// Schedules, leave and hire dates.
    pub context: EngineContext<'a>,
}

/// Turns punches into classified day records.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::{AttendancePeriod, LeaveBook, RawPunch, ScheduleSnapshot};
/// use attendance_engine::reconciliation::{AttendanceEngine, EngineContext, EngineInput};
/// use chrono::NaiveDate;
///
/// let engine = AttendanceEngine::new(EngineConfig::default()).unwrap();
/// let schedules = ScheduleSnapshot::default();
/// let leaves = LeaveBook::default();
/// let hire_dates = HashMap::new();
/// let punches = vec![RawPunch {
///     employee_id: "E100".to_string(),
///     display_name: "Ana".to_string(),
///     timestamp: "2025-03-08T10:00:00".to_string(),
/// }];
///
/// let result = engine
///     .run(&EngineInput {
///         period: AttendancePeriod {
///             start_date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
///             end_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
///         },
///         punches: &punches,
///         roster: &[],
///         context: EngineContext {
///             schedules: &schedules,
///             leaves: &leaves,
///             hire_dates: &hire_dates,
///         },
///     })
///     .unwrap();
///
/// assert_eq!(result.records.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AttendanceEngine {
    config: EngineConfig,
}

impl AttendanceEngine {
    /// Creates an engine, rejecting inconsistent configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the thresholds fail
    /// validation; no run can start with them.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the full pipeline over the input.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the period is reversed or too long.
    /// Problems with individual punches or rows never fail the run; they are
    /// reported in [`ReconciliationResult::warnings`].
    pub fn run(&self, input: &EngineInput<'_>) -> EngineResult<ReconciliationResult> {
        let started = Instant::now();
        let run_id = Uuid::new_v4();
        input.period.validate()?;

        info!(
            run_id = %run_id,
            start_date = %input.period.start_date,
            end_date = %input.period.end_date,
            punches = input.punches.len(),
            "Starting reconciliation run"
        );

        let (events, mut warnings) = parse_raw_punches(input.punches);
        let grid = normalize_punches(&events, input.roster, &input.period);
        let reconciled = self.reconcile_grid(grid, &input.context);

        let mut records = Vec::new();
        let mut summaries = Vec::with_capacity(reconciled.len());
        for (employee_id, days) in reconciled {
            summaries.push(EmployeeSummary::from_records(&employee_id, &days));
            for day in days.iter().filter(|d| d.is_failed()) {
                warnings.push(RunWarning::for_employee(
                    ROW_FAILED_WARNING,
                    format!("{} could not be reconciled: {}", day.date, day.observations.join("; ")),
                    &employee_id,
                ));
            }
            records.extend(days);
        }

        let duration_us = started.elapsed().as_micros() as u64;
        info!(
            run_id = %run_id,
            employees = summaries.len(),
            records = records.len(),
            warnings = warnings.len(),
            duration_us,
            "Reconciliation run completed"
        );

        Ok(ReconciliationResult {
            run_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            period: input.period,
            records,
            summaries,
            warnings,
            duration_us,
        })
    }

    /// Runs stages 2–9 for every employee of a normalized grid.
    pub fn reconcile_grid(
        &self,
        grid: BTreeMap<String, Vec<DayRecord>>,
        context: &EngineContext<'_>,
    ) -> BTreeMap<String, Vec<DayRecord>> {
        let workers = self.config.workers.min(grid.len());
        if workers <= 1 {
            return grid
                .into_iter()
                .map(|(employee_id, days)| {
                    let days = self.process_isolated(&employee_id, days, context);
                    (employee_id, days)
                })
                .collect();
        }

        let mut buckets: Vec<Vec<(String, Vec<DayRecord>)>> = (0..workers).map(|_| Vec::new()).collect();
        for (index, entry) in grid.into_iter().enumerate() {
            buckets[index % workers].push(entry);
        }

        thread::scope(|scope| {
            let handles: Vec<_> = buckets
                .into_iter()
                .map(|bucket| {
                    let fallback: Vec<(String, Vec<DayRecord>)> = bucket
                        .iter()
                        .map(|(employee_id, days)| (employee_id.clone(), blank_copies(days)))
                        .collect();
                    let handle = scope.spawn(move || {
                        bucket
                            .into_iter()
                            .map(|(employee_id, days)| {
                                let days = self.process_isolated(&employee_id, days, context);
                                (employee_id, days)
                            })
                            .collect::<Vec<_>>()
                    });
                    (handle, fallback)
                })
                .collect();

            let mut merged = BTreeMap::new();
            for (handle, fallback) in handles {
                match handle.join() {
                    Ok(results) => merged.extend(results),
                    Err(_) => {
                        for (employee_id, days) in fallback {
                            let failed = fail_all(&employee_id, days, "worker thread panicked");
                            merged.insert(employee_id, failed);
                        }
                    }
                }
            }
            merged
        })
    }

    /// Runs stages 2–9 over one employee's days, in date order.
    pub fn process_employee(&self, days: &mut [DayRecord], context: &EngineContext<'_>) {
        let config = &self.config;

        run_stage(days, "schedule_resolution", |day| {
            apply_schedule(day, context.schedules)
        });
        reconcile_midnight_shifts(days);
        run_stage(days, "break_calculation", |day| {
            calculate_break(day, config.break_noise_minutes);
            Ok(())
        });
        run_stage(days, "classification", |day| {
            classify_day(day, config);
            Ok(())
        });
        recompute_late_counters(days, config.late_deduction_every);

        run_stage(days, "leave_adjustment", |day| apply_leave(day, context.leaves));

        run_stage(days, "forgiveness", |day| {
            apply_forgiveness(day, config);
            Ok(())
        });
        recompute_late_counters(days, config.late_deduction_every);

        run_stage(days, "absence_reclassification", |day| {
            justify_absence(day);
            Ok(())
        });
        recompute_late_counters(days, config.late_deduction_every);

        // NotHired overrides failed rows too.
        for day in days.iter_mut() {
            apply_hire_date(day, context.hire_dates);
        }
        recompute_late_counters(days, config.late_deduction_every);
    }

    /// Processes one employee, turning a panic into failed rows.
    fn process_isolated(
        &self,
        employee_id: &str,
        days: Vec<DayRecord>,
        context: &EngineContext<'_>,
    ) -> Vec<DayRecord> {
        let fallback = blank_copies(&days);
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
            let mut days = days;
            self.process_employee(&mut days, context);
            days
        }));
        match outcome {
            Ok(days) => days,
            Err(_) => {
                warn!(employee_id = %employee_id, "Employee processing panicked");
                fail_all(employee_id, fallback, "employee processing panicked")
            }
        }
    }
}

/// Applies a row-level stage, isolating failures to the row that raised them.
fn run_stage<F>(days: &mut [DayRecord], stage: &str, mut apply: F)
where
    F: FnMut(&mut DayRecord) -> EngineResult<()>,
{
    for day in days.iter_mut().filter(|d| !d.is_failed()) {
        if let Err(err) = apply(day) {
            warn!(
                employee_id = %day.employee_id,
                date = %day.date,
                stage,
                error = %err,
                "Row failed, marking as processing error"
            );
            day.mark_failed(err.to_string());
        }
    }
}

fn blank_copies(days: &[DayRecord]) -> Vec<DayRecord> {
    days.iter()
        .map(|d| DayRecord::new(&d.employee_id, &d.display_name, d.date))
        .collect()
}

fn fail_all(employee_id: &str, days: Vec<DayRecord>, message: &str) -> Vec<DayRecord> {
    days.into_iter()
        .map(|mut day| {
            let err = EngineError::ProcessingError {
                employee_id: employee_id.to_string(),
                date: day.date,
                message: message.to_string(),
            };
            day.mark_failed(err.to_string());
            day
        })
        .collect()
}
