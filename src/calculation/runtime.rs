//! Runtime estimation.
//!
//! Combines the latest reported runtime of an asset with the working time its
//! shift calendar accrued since that reading.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AccrualQuery, RuntimeEstimate, RuntimeMeasurement, ShiftCalendar, latest_measurement,
    minutes_to_hours,
};

use super::accrual::accrue;
use super::validation::resolve_calendar;

/// Estimates an asset's cumulative runtime at `at`.
///
/// Uses the most recent measurement and adds the minutes accrued by the
/// calendar between the measurement instant and `at`, then converts back to
/// hours rounded to one decimal place.
///
/// - Without a calendar the reported hours are returned unchanged.
/// - Without any measurement the runtime is zero.
/// - If `at` precedes the measurement nothing accrues.
///
/// # Errors
///
/// Returns an error if the calendar fails validation, even when no
/// measurement exists.
///
/// # Example
///
/// ```
/// use runtime_accrual::calculation::estimate_runtime;
/// use runtime_accrual::models::{DayOfWeek, MeasurementSource, RuntimeMeasurement, ShiftBlock, ShiftCalendar};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let calendar = ShiftCalendar::new("America/Sao_Paulo").with_days(
///     &[DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Wednesday, DayOfWeek::Thursday, DayOfWeek::Friday],
///     vec![ShiftBlock::new("08:00", "16:00")],
/// );
/// let reading = RuntimeMeasurement {
///     reported_hours: Decimal::new(100, 0),
///     measured_at: Utc.with_ymd_and_hms(2026, 1, 12, 11, 0, 0).unwrap(), // Monday 08:00 local
///     source: MeasurementSource::Manual,
/// };
/// let at = Utc.with_ymd_and_hms(2026, 1, 14, 11, 0, 0).unwrap(); // Wednesday 08:00 local
///
/// let estimate = estimate_runtime(Some(&calendar), &[reading], at).unwrap();
/// assert_eq!(estimate.accrued_minutes, 960);
/// assert_eq!(estimate.runtime_hours, Decimal::new(1160, 1));
/// ```
pub fn estimate_runtime(
    calendar: Option<&ShiftCalendar>,
    measurements: &[RuntimeMeasurement],
    at: DateTime<Utc>,
) -> EngineResult<RuntimeEstimate> {
    let resolved = calendar.map(resolve_calendar).transpose()?;

    let Some(latest) = latest_measurement(measurements) else {
        return Ok(RuntimeEstimate {
            reported_hours: Decimal::ZERO,
            measured_at: None,
            at,
            accrued_minutes: 0,
            runtime_hours: Decimal::ZERO,
        });
    };

    let Some(resolved) = resolved else {
        return Ok(RuntimeEstimate {
            reported_hours: latest.reported_hours,
            measured_at: Some(latest.measured_at),
            at,
            accrued_minutes: 0,
            runtime_hours: latest.reported_hours,
        });
    };

    let accrued_minutes = accrue(&resolved, &AccrualQuery::new(latest.measured_at, at))
        .accumulated_minutes;
    let runtime_hours = minutes_to_hours(latest.reported_minutes() + Decimal::from(accrued_minutes));

    Ok(RuntimeEstimate {
        reported_hours: latest.reported_hours,
        measured_at: Some(latest.measured_at),
        at,
        accrued_minutes,
        runtime_hours,
    })
}
