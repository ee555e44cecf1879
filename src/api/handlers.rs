//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{AttendancePeriod, LeaveBook, ScheduleLookup, ScheduleSnapshot};
use crate::reconciliation::{EngineContext, EngineInput};

use super::request::ReconciliationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reconcile", post(reconcile_handler))
        .with_state(state)
}

/// Handler for POST /reconcile endpoint.
///
/// Accepts a batch of punches for a period and returns the reconciliation
/// result.
async fn reconcile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconciliationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconciliation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let period: AttendancePeriod = request.period.into();
    let override_schedules = (!request.schedules.is_empty())
        .then(|| ScheduleSnapshot::new(request.schedules));
    let schedules: &dyn ScheduleLookup = match &override_schedules {
        Some(snapshot) => snapshot,
        None => state.schedules(),
    };
    let leaves = LeaveBook::new(request.leaves);
    let hire_dates: HashMap<_, _> = state
        .hire_dates()
        .iter()
        .map(|(id, date)| (id.clone(), *date))
        .chain(request.hire_dates)
        .collect();

    let input = EngineInput {
        period,
        punches: &request.punches,
        roster: &request.roster,
        context: EngineContext {
            schedules,
            leaves: &leaves,
            hire_dates: &hire_dates,
        },
    };

    match state.engine().run(&input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %result.run_id,
                records = result.records.len(),
                warnings = result.warnings.len(),
                duration_us = result.duration_us,
                "Reconciliation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reconciliation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
