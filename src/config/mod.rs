//! Configuration loading and management for the runtime accrual engine.
//!
//! This module loads engine settings and named shift calendars from YAML
//! files so that requests can refer to a calendar by id.
//!
//! # Example
//!
//! ```no_run
//! use runtime_accrual::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine: {}", config.settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, RuntimeConfig};
