//! Core data models for the runtime accrual engine.
//!
//! This module contains the shift calendar shapes, runtime measurements and
//! the query/result values exchanged with the calculator.

mod accrual;
mod calendar;
mod measurement;

pub use accrual::{
    AccrualQuery, AccrualResult, BlockContribution, DayBreakdown, RuntimeEstimate,
    minutes_to_hours,
};
pub use calendar::{BreakInterval, DayOfWeek, DaySchedule, ShiftBlock, ShiftCalendar};
pub use measurement::{MeasurementSource, RuntimeMeasurement, latest_measurement};
