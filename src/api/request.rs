//! Request types for the runtime accrual API.
//!
//! This module defines the JSON request structures for the `/runtime` and
//! `/accrual` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AccrualQuery, RuntimeMeasurement, ShiftCalendar};

/// Request body for the `/runtime` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeRequest {
    /// An inline calendar. Takes precedence over `calendar_id`.
    #[serde(default)]
    pub calendar: Option<ShiftCalendar>,
    /// Id of a configured calendar.
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// Runtime readings for the asset, in any order.
    pub measurements: Vec<RuntimeMeasurement>,
    /// Instant to estimate the runtime at. Defaults to the time of the request.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Request body for the `/accrual` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualRequest {
    /// An inline calendar. Takes precedence over `calendar_id`.
    #[serde(default)]
    pub calendar: Option<ShiftCalendar>,
    /// Id of a configured calendar.
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// Start of the accrual window.
    pub from: DateTime<Utc>,
    /// End of the accrual window.
    pub to: DateTime<Utc>,
    /// Whether to return the per-day breakdown.
    #[serde(default)]
    pub include_breakdown: bool,
}

impl From<&AccrualRequest> for AccrualQuery {
    fn from(request: &AccrualRequest) -> Self {
        AccrualQuery {
            from: request.from,
            to: request.to,
            include_breakdown: request.include_breakdown,
        }
    }
}

/// Picks the inline calendar, else looks up `calendar_id`, else none.
pub(crate) fn select_calendar<'a>(
    inline: Option<&'a ShiftCalendar>,
    calendar_id: Option<&str>,
    config: &'a ConfigLoader,
) -> EngineResult<Option<&'a ShiftCalendar>> {
    match (inline, calendar_id) {
        (Some(calendar), _) => Ok(Some(calendar)),
        (None, Some(id)) => config.get_calendar(id).map(Some),
        (None, None) => Ok(None),
    }
}
