//! Punch models.
//!
//! A punch is a single clock-in/out event. The feed delivers [`RawPunch`]
//! values with textual timestamps; the normalizer turns the parseable ones
//! into [`PunchEvent`]s.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A positional punch slot within a day. `None` means "no punch here".
pub type PunchSlot = Option<NaiveTime>;

/// A punch exactly as delivered by the time-clock feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunch {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee name as shown on the device.
    #[serde(default)]
    pub display_name: String,
    /// Local timestamp text, already timezone-normalized upstream.
    pub timestamp: String,
}

/// A parsed punch event.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchEvent;
/// use chrono::NaiveDate;
///
/// let punch = PunchEvent {
///     employee_id: "E100".to_string(),
///     display_name: "Ana Ruiz".to_string(),
///     timestamp: NaiveDate::from_ymd_opt(2025, 3, 3)
///         .unwrap()
///         .and_hms_opt(18, 4, 0)
///         .unwrap(),
/// };
/// assert_eq!(punch.date(), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee name as shown on the device.
    pub display_name: String,
    /// Local timestamp of the punch.
    pub timestamp: NaiveDateTime,
}

impl PunchEvent {
    /// The calendar date the punch was recorded on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The time-of-day of the punch.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}

/// An employee known to the caller, punches or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub display_name: String,
}
