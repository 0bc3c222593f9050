//! HTTP API module for the runtime accrual engine.
//!
//! This module provides the REST endpoints other services use to estimate
//! asset runtime and to audit accrued working time.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AccrualRequest, RuntimeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
