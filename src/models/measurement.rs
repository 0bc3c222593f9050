//! Runtime measurement model.
//!
//! A [`RuntimeMeasurement`] is an immutable reading of an asset's cumulative
//! operating hours at an instant. Newer readings supersede older ones.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a runtime reading came from. Not used by the arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementSource {
    /// Submitted by an operator.
    #[default]
    Manual,
    /// Snapshot taken when the asset's shift calendar was edited.
    CalendarChange,
    /// Delivered by an automated integration.
    Automated,
}

/// A reported cumulative runtime at a point in time.
///
/// # Example
///
/// ```
/// use runtime_accrual::models::{MeasurementSource, RuntimeMeasurement};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let reading = RuntimeMeasurement {
///     reported_hours: Decimal::new(12345, 1), // 1234.5 hours
///     measured_at: Utc.with_ymd_and_hms(2026, 1, 12, 11, 0, 0).unwrap(),
///     source: MeasurementSource::Manual,
/// };
/// assert_eq!(reading.reported_minutes(), Decimal::new(74070, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeMeasurement {
    /// Cumulative operating hours reported at `measured_at`.
    pub reported_hours: Decimal,
    /// The instant the reading applies to.
    pub measured_at: DateTime<Utc>,
    /// Provenance of the reading.
    #[serde(default)]
    pub source: MeasurementSource,
}

impl RuntimeMeasurement {
    /// The reported runtime expressed in minutes.
    pub fn reported_minutes(&self) -> Decimal {
        self.reported_hours * Decimal::new(60, 0)
    }
}

/// Returns the most recent measurement by `measured_at`.
///
/// When two readings share an instant the one appearing later in the slice wins.
///
/// # Example
///
/// ```
/// use runtime_accrual::models::{latest_measurement, MeasurementSource, RuntimeMeasurement};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let older = RuntimeMeasurement {
///     reported_hours: Decimal::new(100, 0),
///     measured_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
///     source: MeasurementSource::Manual,
/// };
/// let newer = RuntimeMeasurement {
///     reported_hours: Decimal::new(90, 0),
///     measured_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
///     source: MeasurementSource::Automated,
/// };
/// let readings = [newer.clone(), older];
/// assert_eq!(latest_measurement(&readings), Some(&newer));
/// ```
pub fn latest_measurement(measurements: &[RuntimeMeasurement]) -> Option<&RuntimeMeasurement> {
    measurements.iter().max_by_key(|m| m.measured_at)
}
