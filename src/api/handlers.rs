//! HTTP request handlers for the runtime accrual API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_accrual, estimate_runtime};
use crate::error::EngineResult;
use crate::models::{AccrualQuery, AccrualResult, RuntimeEstimate, latest_measurement};

use super::request::{AccrualRequest, RuntimeRequest, select_calendar};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/runtime", post(runtime_handler))
        .route("/accrual", post(accrual_handler))
        .with_state(state)
}

/// Handler for POST /runtime endpoint.
///
/// Estimates an asset's current runtime from its measurements and calendar.
async fn runtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<RuntimeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing runtime request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match perform_runtime(&state, &request) {
        Ok(estimate) => {
            info!(
                correlation_id = %correlation_id,
                measurements = request.measurements.len(),
                accrued_minutes = estimate.accrued_minutes,
                runtime_hours = %estimate.runtime_hours,
                duration_us = start_time.elapsed().as_micros(),
                "Runtime estimated successfully"
            );
            json_response(StatusCode::OK, &estimate)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Runtime estimation failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /accrual endpoint.
///
/// Returns the working minutes accrued over a window, optionally per day.
async fn accrual_handler(
    State(state): State<AppState>,
    payload: Result<Json<AccrualRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing accrual request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match perform_accrual(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                from = %request.from,
                to = %request.to,
                accumulated_minutes = result.accumulated_minutes,
                accumulated_hours = %result.accumulated_hours(),
                duration_us = start_time.elapsed().as_micros(),
                "Accrual calculated successfully"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Accrual calculation failed");
            error_response(err.into())
        }
    }
}

fn perform_runtime(state: &AppState, request: &RuntimeRequest) -> EngineResult<RuntimeEstimate> {
    let config = state.config();
    let calendar = select_calendar(
        request.calendar.as_ref(),
        request.calendar_id.as_deref(),
        config,
    )?;
    let at = request.at.unwrap_or_else(Utc::now);

    if calendar.is_some() {
        if let Some(latest) = latest_measurement(&request.measurements) {
            config.settings().check_query_span(latest.measured_at, at)?;
        }
    }

    estimate_runtime(calendar, &request.measurements, at)
}

fn perform_accrual(state: &AppState, request: &AccrualRequest) -> EngineResult<AccrualResult> {
    let config = state.config();
    let calendar = select_calendar(
        request.calendar.as_ref(),
        request.calendar_id.as_deref(),
        config,
    )?;
    config
        .settings()
        .check_query_span(request.from, request.to)?;

    calculate_accrual(calendar, &AccrualQuery::from(request))
}

/// Unwraps a JSON body, mapping extractor rejections to 400 responses.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

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
    Err(error_response(ApiErrorResponse::bad_request(error)))
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}
