//! Calculation logic for the runtime accrual engine.
//!
//! This module contains local-time anchoring against IANA time zones,
//! fail-fast calendar validation, the day-by-day shift accrual walk with its
//! midnight-crossing and clipping rules, and runtime estimation from the
//! latest measurement. Everything here is pure: no clock is read and no
//! state is shared between calls.

mod accrual;
mod anchoring;
mod runtime;
mod validation;
mod window;

pub use accrual::{accrue, accrue_day, calculate_accrual};
pub use anchoring::{anchor, parse_time_zone, start_of_day};
pub use runtime::estimate_runtime;
pub use validation::{
    ResolvedBlock, ResolvedBreak, ResolvedCalendar, parse_time_of_day, resolve_calendar,
};
pub use window::{Window, covered_seconds, whole_minutes};
