//! Core data models for the attendance engine.
//!
//! This module contains the punch, schedule, leave and day-record types the
//! pipeline reads and writes, plus the run result handed to reporting.

mod day_record;
mod duration;
mod leave;
mod period;
mod punch;
mod reconciliation_result;
mod schedule;

pub use day_record::{
    Classification, DayRecord, MISSING_ENTRY_PUNCH, MISSING_EXIT_PUNCH,
    NEGATIVE_DURATION_CLAMPED,
};
pub use duration::{
    duration_to_hours, format_hms, hms, hours_to_duration, parse_hms, seconds_of_day,
};
pub use leave::{LeaveBook, LeaveGrant, NOT_HIRED_LEAVE_TYPE, PolicyAction};
pub use period::{AttendancePeriod, MAX_PERIOD_DAYS};
pub use punch::{PunchEvent, PunchSlot, RawPunch, RosterEntry};
pub use reconciliation_result::{EmployeeSummary, ReconciliationResult, RunWarning};
pub use schedule::{MonthHalf, ScheduleEntry, ScheduleLookup, ScheduleSnapshot};
