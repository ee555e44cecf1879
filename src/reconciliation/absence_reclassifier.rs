//! Justification of absences covered by leave.

use crate::models::{Classification, DayRecord};

/// Marks an absence or lateness as justified when the day has leave.
///
/// Returns whether the tag changed.
pub fn justify_absence(record: &mut DayRecord) -> bool {
    let eligible = record.classification.is_absence() || record.classification == Classification::Late;
    if !record.has_leave || !eligible {
        return false;
    }
    record.classification = Classification::JustifiedAbsence;
    record.justified = true;
    true
}
