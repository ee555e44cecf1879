//! Duration helpers shared by the models and the pipeline stages.
//!
//! Worked, break and expected time are carried as [`chrono::Duration`] and
//! serialized as `HH:MM:SS` strings. Schedule and summary hours are decimal
//! hours, so this module also converts between the two representations.

use chrono::{Duration, NaiveTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const SECONDS_PER_HOUR: i64 = 3600;

/// Formats a duration as `HH:MM:SS`. Hours are not wrapped at 24.
///
/// # Example
///
/// ```
/// use attendance_engine::models::format_hms;
/// use chrono::Duration;
///
/// assert_eq!(format_hms(Duration::minutes(483)), "08:03:00");
/// assert_eq!(format_hms(Duration::zero()), "00:00:00");
/// ```
pub fn format_hms(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total / SECONDS_PER_HOUR,
        (total % SECONDS_PER_HOUR) / 60,
        total % 60
    )
}

/// Parses `HH:MM:SS` or `HH:MM` into a duration.
pub fn parse_hms(value: &str) -> Option<Duration> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    let (h, m, s) = match parts.as_slice() {
        [h, m] => (h.parse::<i64>().ok()?, m.parse::<i64>().ok()?, 0),
        [h, m, s] => (
            h.parse::<i64>().ok()?,
            m.parse::<i64>().ok()?,
            s.parse::<i64>().ok()?,
        ),
        _ => return None,
    };
    if h < 0 || !(0..60).contains(&m) || !(0..60).contains(&s) {
        return None;
    }
    Some(Duration::seconds(h * SECONDS_PER_HOUR + m * 60 + s))
}

/// Converts decimal hours to a duration rounded to the second.
///
/// Returns `None` when the value does not fit a `chrono::Duration`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::hours_to_duration;
/// use chrono::Duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_to_duration(Decimal::new(75, 1)), Some(Duration::minutes(450)));
/// ```
pub fn hours_to_duration(hours: Decimal) -> Option<Duration> {
    let seconds = hours
        .checked_mul(Decimal::from(SECONDS_PER_HOUR))?
        .round()
        .to_i64()?;
    Duration::try_seconds(seconds)
}

/// Converts a duration to decimal hours rounded to two places.
pub fn duration_to_hours(duration: Duration) -> Decimal {
    (Decimal::from(duration.num_seconds()) / Decimal::from(SECONDS_PER_HOUR)).round_dp(2)
}

/// Seconds elapsed since midnight for a time-of-day.
pub fn seconds_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// Serde adapter for `HH:MM:SS` durations.
pub mod hms {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a duration as `HH:MM:SS`.
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hms(*value))
    }

    /// Deserializes a duration from `HH:MM:SS` or `HH:MM`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hms(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration '{}'", raw)))
    }
}
