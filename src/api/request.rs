//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structure for the `/reconcile`
//! endpoint.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AttendancePeriod, LeaveGrant, RawPunch, RosterEntry, ScheduleEntry};

/// Request body for the `/reconcile` endpoint.
///
/// Only the period and the punches are required. Schedules, when given,
/// replace the server's snapshot for this request; hire dates are merged
/// over the server's, the request winning on conflicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationRequest {
    /// The period to reconcile.
    pub period: PeriodRequest,
    /// Raw punches from the feed.
    pub punches: Vec<RawPunch>,
    /// Employees to report even without punches.
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    /// Schedule entries overriding the server defaults.
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
    /// Approved leave grants.
    #[serde(default)]
    pub leaves: Vec<LeaveGrant>,
    /// Hire dates by employee id.
    #[serde(default)]
    pub hire_dates: HashMap<String, NaiveDate>,
}

/// Period information in a reconciliation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl From<PeriodRequest> for AttendancePeriod {
    fn from(req: PeriodRequest) -> Self {
        AttendancePeriod {
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PolicyAction;

    #[test]
    fn test_deserialize_minimal_request() {
        let json = r#"{
            "period": { "start_date": "2025-03-03", "end_date": "2025-03-09" },
            "punches": [
                { "employee_id": "E100", "timestamp": "2025-03-03T09:02:00" }
            ]
        }"#;

        let request: ReconciliationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.punches.len(), 1);
        assert_eq!(request.punches[0].display_name, "");
        assert!(request.schedules.is_empty());
        assert!(request.leaves.is_empty());
        assert!(request.hire_dates.is_empty());
    }

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "period": { "start_date": "2025-03-03", "end_date": "2025-03-09" },
            "punches": [],
            "roster": [{ "employee_id": "E100", "display_name": "Ana Ruiz" }],
            "schedules": [{
                "employee_id": "E100",
                "iso_weekday": 1,
                "entry_time": "09:00:00",
                "exit_time": "17:00:00",
                "crosses_midnight": false,
                "total_hours": "8"
            }],
            "leaves": [{
                "employee_id": "E100",
                "date": "2025-03-04",
                "leave_type": "VACACIONES",
                "normalized_type": "vacation",
                "half_day": false,
                "policy_action": "ajustar_a_cero"
            }],
            "hire_dates": { "E100": "2020-01-06" }
        }"#;

        let request: ReconciliationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.roster[0].display_name, "Ana Ruiz");
        assert_eq!(request.schedules[0].half_of_month, None);
        assert_eq!(request.leaves[0].policy_action, PolicyAction::AdjustToZero);
        assert_eq!(
            request.hire_dates["E100"],
            NaiveDate::from_ymd_opt(2020, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_period_conversion() {
        let req = PeriodRequest {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        };
        let period: AttendancePeriod = req.into();
        assert_eq!(period.dates().len(), 7);
    }
}
