//! Shift-calendar based runtime accrual for physical assets.
//!
//! Given an asset's latest reported runtime and the weekly shift calendar it
//! works to, this crate estimates the runtime at any later instant by summing
//! the scheduled working minutes in between. Shift times are local to the
//! calendar's IANA time zone, blocks may cross midnight, and breaks are
//! subtracted.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
