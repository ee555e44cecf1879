//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoint that reconciles a batch of
//! punches for a period and returns the classified day records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReconciliationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
