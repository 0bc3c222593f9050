//! Error types for the runtime accrual engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating calendars,
//! loading configuration, or serving accrual queries.

use thiserror::Error;

use crate::models::DayOfWeek;

/// The main error type for the runtime accrual engine.
///
/// Input problems (bad time-of-day strings, unknown time zones) are detected
/// once, before any calculation starts, so a caller never sees a partially
/// computed result followed by a failure.
///
/// # Example
///
/// ```
/// use runtime_accrual::error::EngineError;
///
/// let error = EngineError::InvalidTimeZone {
///     zone: "Mars/Olympus_Mons".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time zone: Mars/Olympus_Mons");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A block or break boundary could not be parsed as a time of day.
    #[error("Invalid time of day '{value}' for {day} block {block} field '{field}'")]
    InvalidTimeOfDay {
        /// The weekday schedule that owns the block.
        day: DayOfWeek,
        /// Zero-based index of the block within the day schedule.
        block: usize,
        /// The offending field, e.g. `start` or `breaks[0].end`.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The calendar's time zone is not a recognized IANA identifier.
    #[error("Invalid time zone: {zone}")]
    InvalidTimeZone {
        /// The zone identifier as supplied.
        zone: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request referenced a calendar id that is not configured.
    #[error("Calendar not found: {id}")]
    CalendarNotFound {
        /// The calendar id that was not found.
        id: String,
    },

    /// A query spans more days than the configured limit allows.
    #[error("Query spans {days} days, exceeding the limit of {max_days}")]
    QueryTooLong {
        /// Number of calendar days the query touches.
        days: i64,
        /// The configured maximum.
        max_days: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
