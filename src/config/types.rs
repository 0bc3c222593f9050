//! Configuration types for the runtime accrual engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftCalendar;

const SECONDS_PER_DAY: i64 = 86_400;

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Human-readable name of this deployment.
    pub name: String,
    /// Longest query span, in days, the API accepts. `None` means unlimited.
    #[serde(default)]
    pub max_query_days: Option<u32>,
}

impl EngineSettings {
    /// Checks a query interval against `max_query_days`.
    ///
    /// The span is counted in started 24-hour periods, so a query of one day
    /// and one second spans two days. Degenerate intervals span zero days.
    ///
    /// # Example
    ///
    /// ```
    /// use runtime_accrual::config::EngineSettings;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let settings = EngineSettings { name: "plant".to_string(), max_query_days: Some(7) };
    /// let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    /// assert!(settings.check_query_span(from, Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap()).is_ok());
    /// assert!(settings.check_query_span(from, Utc.with_ymd_and_hms(2026, 1, 9, 0, 0, 0).unwrap()).is_err());
    /// ```
    pub fn check_query_span(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> EngineResult<()> {
        let Some(max_days) = self.max_query_days else {
            return Ok(());
        };

        let seconds = (to - from).num_seconds().max(0);
        let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
        if days > i64::from(max_days) {
            return Err(EngineError::QueryTooLong { days, max_days });
        }
        Ok(())
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Engine settings.
    settings: EngineSettings,
    /// Named shift calendars keyed by id.
    calendars: HashMap<String, ShiftCalendar>,
}

impl RuntimeConfig {
    /// Creates a new RuntimeConfig from its component parts.
    pub fn new(settings: EngineSettings, calendars: HashMap<String, ShiftCalendar>) -> Self {
        Self {
            settings,
            calendars,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all configured calendars.
    pub fn calendars(&self) -> &HashMap<String, ShiftCalendar> {
        &self.calendars
    }
}
