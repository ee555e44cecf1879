//! Leave grant models.
//!
//! Approved leave and permits arrive from an external collaborator. The
//! [`LeaveBook`] indexes them by employee for per-date lookup.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Leave type assigned to days before an employee's hire date.
pub const NOT_HIRED_LEAVE_TYPE: &str = "not_hired";

/// How a leave grant affects expected hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyAction {
    /// Flag the day only; expected hours stay untouched.
    #[serde(rename = "no_ajustar")]
    NoAdjust,
    /// Zero expected hours, or halve them for a half-day grant.
    #[serde(rename = "ajustar_a_cero")]
    AdjustToZero,
    /// Discount the granted hours from expected hours.
    #[serde(rename = "prorratear")]
    Prorate,
}

/// An approved leave or permit.
///
/// A grant covers `date` alone, or the inclusive range `date..=end_date`
/// when `end_date` is set. Half-day grants always cover `date` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveGrant {
    /// The employee the leave was granted to.
    pub employee_id: String,
    /// First (or only) date covered.
    pub date: NaiveDate,
    /// Last date covered, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The leave type as recorded by the source system.
    pub leave_type: String,
    /// The leave type after normalization, e.g. `vacation` or `medical`.
    pub normalized_type: String,
    /// Whether the grant covers half a day.
    #[serde(default)]
    pub half_day: bool,
    /// How the grant affects expected hours.
    pub policy_action: PolicyAction,
    /// Granted hours, used by [`PolicyAction::Prorate`].
    #[serde(default)]
    pub hours: Option<Decimal>,
}

impl LeaveGrant {
    /// Last date the grant covers, inclusive.
    pub fn last_date(&self) -> NaiveDate {
        match self.end_date {
            Some(end) if !self.half_day && end > self.date => end,
            _ => self.date,
        }
    }

    /// Returns true when the grant covers `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{LeaveGrant, PolicyAction};
    /// use chrono::NaiveDate;
    ///
    /// let grant = LeaveGrant {
    ///     employee_id: "E100".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
    ///     end_date: Some(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()),
    ///     leave_type: "VACACIONES".to_string(),
    ///     normalized_type: "vacation".to_string(),
    ///     half_day: false,
    ///     policy_action: PolicyAction::AdjustToZero,
    ///     hours: None,
    /// };
    /// assert!(grant.covers(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
    /// assert!(!grant.covers(NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()));
    /// ```
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.date && date <= self.last_date()
    }
}

/// Leave grants indexed by employee.
#[derive(Debug, Clone, Default)]
pub struct LeaveBook {
    grants: HashMap<String, Vec<LeaveGrant>>,
}

impl LeaveBook {
    /// Builds the book from grants in arrival order.
    ///
    /// When two grants cover the same employee and date, the later one wins.
    pub fn new(grants: Vec<LeaveGrant>) -> Self {
        let mut book: HashMap<String, Vec<LeaveGrant>> = HashMap::new();
        for grant in grants {
            book.entry(grant.employee_id.clone()).or_default().push(grant);
        }
        Self { grants: book }
    }

    /// Returns the grant covering `employee_id` on `date`, if any.
    pub fn get(&self, employee_id: &str, date: NaiveDate) -> Option<&LeaveGrant> {
        self.grants
            .get(employee_id)?
            .iter()
            .rev()
            .find(|grant| grant.covers(date))
    }

    /// Returns true when no grants are held.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn grant(date: &str, end: Option<&str>, half_day: bool) -> LeaveGrant {
        LeaveGrant {
            employee_id: "E100".to_string(),
            date: make_date(date),
            end_date: end.map(make_date),
            leave_type: "PERMISO".to_string(),
            normalized_type: "permit".to_string(),
            half_day,
            policy_action: PolicyAction::AdjustToZero,
            hours: None,
        }
    }

    #[test]
    fn test_multi_day_grant_covers_inclusive_range() {
        let book = LeaveBook::new(vec![grant("2025-03-03", Some("2025-03-05"), false)]);
        assert!(book.get("E100", make_date("2025-03-03")).is_some());
        assert!(book.get("E100", make_date("2025-03-04")).is_some());
        assert!(book.get("E100", make_date("2025-03-05")).is_some());
        assert!(book.get("E100", make_date("2025-03-06")).is_none());
    }

    #[test]
    fn test_half_day_grant_ignores_end_date() {
        let g = grant("2025-03-03", Some("2025-03-05"), true);
        assert_eq!(g.last_date(), make_date("2025-03-03"));
        assert!(!g.covers(make_date("2025-03-04")));
    }

    #[test]
    fn test_end_date_before_start_covers_start_only() {
        let g = grant("2025-03-03", Some("2025-03-01"), false);
        assert_eq!(g.last_date(), make_date("2025-03-03"));
        assert!(!g.covers(make_date("2025-03-02")));
    }

    #[test]
    fn test_later_grant_wins_on_overlap() {
        let mut second = grant("2025-03-04", None, false);
        second.normalized_type = "medical".to_string();
        let book = LeaveBook::new(vec![grant("2025-03-03", Some("2025-03-05"), false), second]);
        assert_eq!(book.get("E100", make_date("2025-03-04")).unwrap().normalized_type, "medical");
        assert_eq!(book.get("E100", make_date("2025-03-05")).unwrap().normalized_type, "permit");
    }

    #[test]
    fn test_open_ended_grant_is_not_expanded() {
        let book = LeaveBook::new(vec![grant("2025-03-03", Some("9999-12-31"), false)]);
        assert!(book.get("E100", make_date("2025-03-03")).is_some());
        assert!(book.get("E100", make_date("9999-12-31")).is_some());
        assert!(book.get("E100", make_date("2025-03-02")).is_none());
    }

    #[test]
    fn test_policy_action_wire_names() {
        assert_eq!(
            serde_json::to_string(&PolicyAction::NoAdjust).unwrap(),
            "\"no_ajustar\""
        );
        assert_eq!(
            serde_json::from_str::<PolicyAction>("\"ajustar_a_cero\"").unwrap(),
            PolicyAction::AdjustToZero
        );
        assert_eq!(
            serde_json::from_str::<PolicyAction>("\"prorratear\"").unwrap(),
            PolicyAction::Prorate
        );
    }

    #[test]
    fn test_unknown_employee_has_no_grant() {
        let book = LeaveBook::new(vec![grant("2025-03-03", None, false)]);
        assert!(book.get("E999", make_date("2025-03-03")).is_none());
    }
}
