//! Reconciliation logic for the attendance engine.
//!
//! This module contains the pipeline stages that turn raw punches into
//! classified day records: punch normalization, schedule resolution,
//! midnight shift reconciliation, break calculation, attendance
//! classification, the cumulative Late counter, leave adjustment,
//! forgiveness, absence justification and the hire date override. The
//! [`AttendanceEngine`] runs them in order.

mod absence_reclassifier;
mod attendance_classifier;
mod break_calculator;
mod engine;
mod forgiveness;
mod hire_date;
mod late_counter;
mod leave_adjuster;
mod midnight_shift;
mod punch_normalizer;
mod schedule_resolution;

pub use absence_reclassifier::justify_absence;
pub use attendance_classifier::{
    arrival_delta_minutes, classify_day, classify_punctuality, detect_early_departure,
};
pub use break_calculator::{calculate_break, total_break};
pub use engine::{AttendanceEngine, EngineContext, EngineInput, ROW_FAILED_WARNING};
pub use forgiveness::apply_forgiveness;
pub use hire_date::apply_hire_date;
pub use late_counter::recompute_late_counters;
pub use leave_adjuster::{adjusted_expected_hours, apply_leave};
pub use midnight_shift::{reconcile_midnight_shifts, shift_duration};
pub use punch_normalizer::{
    MALFORMED_PUNCH_WARNING, normalize_punches, parse_raw_punches, parse_timestamp,
};
pub use schedule_resolution::apply_schedule;
