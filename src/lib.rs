//! Attendance Reconciliation Engine
//!
//! This crate turns raw time-clock punches into one classified record per
//! employee and calendar day. It reconciles night shifts that cross
//! midnight, applies approved leave, forgives lateness when the expected
//! hours were worked and overrides days before an employee's hire date.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
