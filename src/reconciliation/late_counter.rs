//! Cumulative Late counter.
//!
//! Every Nth Late day of an employee carries a deduction. Because later
//! stages can turn Late days into something else, the counter is always
//! rebuilt from scratch over the employee's full sequence.

use crate::models::{Classification, DayRecord};

/// Recomputes `late_occurrence` and `late_deduction` for one employee.
///
/// `days` must be a single employee's records in ascending date order.
pub fn recompute_late_counters(days: &mut [DayRecord], deduction_every: u32) {
    let mut count = 0u32;
    for day in days.iter_mut() {
        if day.classification == Classification::Late {
            count += 1;
            day.late_occurrence = count;
            day.late_deduction = deduction_every > 0 && count % deduction_every == 0;
        } else {
            day.late_occurrence = 0;
            day.late_deduction = false;
        }
    }
}
