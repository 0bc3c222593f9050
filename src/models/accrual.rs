//! Accrual query and result models.
//!
//! This module contains the transient [`AccrualQuery`] value handed to the
//! calculator and the [`AccrualResult`] it produces, including the optional
//! per-day breakdown used by audit views, plus the [`RuntimeEstimate`]
//! returned to runtime displays.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::DayOfWeek;

/// The interval over which working minutes are accrued.
///
/// `from` is usually the instant of the latest runtime measurement and `to`
/// the instant the caller wants the runtime for. A query with `from > to` is
/// degenerate and accrues zero minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualQuery {
    /// Start of the interval (inclusive).
    pub from: DateTime<Utc>,
    /// End of the interval (exclusive).
    pub to: DateTime<Utc>,
    /// Whether the per-day breakdown should be collected.
    #[serde(default)]
    pub include_breakdown: bool,
}

impl AccrualQuery {
    /// Creates a query without a breakdown.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            include_breakdown: false,
        }
    }

    /// Requests the per-day breakdown.
    pub fn with_breakdown(mut self) -> Self {
        self.include_breakdown = true;
        self
    }

    /// Returns true when `from > to`.
    pub fn is_degenerate(&self) -> bool {
        self.from > self.to
    }
}

/// The minutes one block contributed to one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContribution {
    /// The weekday whose schedule defines the block.
    pub weekday_of_origin: DayOfWeek,
    /// Index of the block within that weekday's schedule.
    pub block_index: usize,
    /// Optional block label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Start of the counted window after all clipping.
    pub start: DateTime<Utc>,
    /// End of the counted window after all clipping.
    pub end: DateTime<Utc>,
    /// Minutes between `start` and `end`.
    pub gross_minutes: i64,
    /// Break minutes overlapping the window.
    pub break_minutes: i64,
    /// Minutes counted after removing breaks.
    pub net_minutes: i64,
    /// True when this is the after-midnight remainder of the previous day's block.
    pub carry_in: bool,
}

/// Minutes accrued on a single local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// The local calendar date in the calendar's time zone.
    pub date: NaiveDate,
    /// The weekday of `date`.
    pub weekday: DayOfWeek,
    /// Total net minutes attributed to this date.
    pub minutes_worked: i64,
    /// The part of `minutes_worked` carried in from blocks that began the day before.
    pub carry_in_minutes: i64,
    /// The blocks that contributed a non-empty window.
    pub contributing_blocks: Vec<BlockContribution>,
}

/// The output of an accrual calculation.
///
/// # Example
///
/// ```
/// use runtime_accrual::models::AccrualResult;
///
/// let result = AccrualResult::zero();
/// assert_eq!(result.accumulated_minutes, 0);
/// assert!(result.breakdown.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Total working minutes inside the query interval. Never negative.
    pub accumulated_minutes: i64,
    /// Per-day breakdown, present when it was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<DayBreakdown>>,
}

impl AccrualResult {
    /// A result with no accrued minutes and no breakdown.
    pub fn zero() -> Self {
        Self {
            accumulated_minutes: 0,
            breakdown: None,
        }
    }

    /// The accrued minutes as hours rounded to one decimal place.
    pub fn accumulated_hours(&self) -> Decimal {
        minutes_to_hours(Decimal::new(self.accumulated_minutes, 0))
    }
}

/// Converts minutes to hours rounded half away from zero to one decimal place.
pub fn minutes_to_hours(minutes: Decimal) -> Decimal {
    (minutes / Decimal::new(60, 0)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// The estimated cumulative runtime of an asset at an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEstimate {
    /// Hours reported by the latest measurement, zero if there is none.
    pub reported_hours: Decimal,
    /// Instant of the latest measurement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured_at: Option<DateTime<Utc>>,
    /// The instant the estimate is for.
    pub at: DateTime<Utc>,
    /// Working minutes accrued since the measurement.
    pub accrued_minutes: i64,
    /// Reported plus accrued runtime in hours, rounded to one decimal place.
    pub runtime_hours: Decimal,
}
