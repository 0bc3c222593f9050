//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and shift calendars from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::resolve_calendar;
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftCalendar;

use super::types::{EngineSettings, RuntimeConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to look up shift calendars by id.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Engine settings
/// └── calendars/           # Optional
///     ├── plant_weekdays.yaml
///     └── night_shift.yaml
/// ```
///
/// A calendar's id is its `id` field, or the file stem when the field is
/// absent. Every calendar is validated while loading.
///
/// # Example
///
/// ```no_run
/// use runtime_accrual::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let calendar = loader.get_calendar("plant_weekdays").unwrap();
/// println!("Calendar zone: {}", calendar.time_zone);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RuntimeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` is missing
    /// - Any file contains invalid YAML
    /// - A calendar fails validation
    /// - Two calendars share an id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let calendars = Self::load_calendars(&path.join("calendars"))?;

        debug!(
            name = %settings.name,
            calendars = calendars.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: RuntimeConfig::new(settings, calendars),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every calendar file from the calendars directory.
    fn load_calendars(calendars_dir: &Path) -> EngineResult<HashMap<String, ShiftCalendar>> {
        let mut calendars = HashMap::new();
        if !calendars_dir.exists() {
            return Ok(calendars);
        }

        let dir_str = calendars_dir.display().to_string();
        let entries = fs::read_dir(calendars_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                paths.push(path);
            }
        }
        // Directory order is platform dependent
        paths.sort();

        for path in paths {
            let path_str = path.display().to_string();
            let mut calendar = Self::load_yaml::<ShiftCalendar>(&path)?;

            resolve_calendar(&calendar).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

            let id = match &calendar.id {
                Some(id) => id.clone(),
                None => path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .ok_or_else(|| EngineError::ConfigParseError {
                        path: path_str.clone(),
                        message: "calendar has no id".to_string(),
                    })?,
            };
            calendar.id = Some(id.clone());

            if calendars.contains_key(&id) {
                return Err(EngineError::ConfigParseError {
                    path: path_str,
                    message: format!("duplicate calendar id '{}'", id),
                });
            }
            calendars.insert(id, calendar);
        }

        Ok(calendars)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns all configured calendars keyed by id.
    pub fn calendars(&self) -> &HashMap<String, ShiftCalendar> {
        self.config.calendars()
    }

    /// Gets a calendar by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use runtime_accrual::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let calendar = loader.get_calendar("night_shift")?;
    /// println!("Zone: {}", calendar.time_zone);
    /// # Ok::<(), runtime_accrual::error::EngineError>(())
    /// ```
    pub fn get_calendar(&self, id: &str) -> EngineResult<&ShiftCalendar> {
        self.config
            .calendars()
            .get(id)
            .ok_or_else(|| EngineError::CalendarNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    /// A scratch config directory removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(engine_yaml: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("runtime-accrual-{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(dir.join("calendars")).unwrap();
            fs::write(dir.join("engine.yaml"), engine_yaml).unwrap();
            Self(dir)
        }

        fn calendar(&self, file: &str, yaml: &str) -> &Self {
            fs::write(self.0.join("calendars").join(file), yaml).unwrap();
            self
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().name, "Default runtime accrual engine");
        assert_eq!(loader.settings().max_query_days, Some(366));
        assert_eq!(loader.calendars().len(), 3);
    }

    #[test]
    fn test_get_calendar() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let calendar = loader.get_calendar("plant_weekdays").unwrap();
        assert_eq!(calendar.time_zone, "America/Sao_Paulo");
        assert_eq!(calendar.days.len(), 5);
        assert!(calendar.day(DayOfWeek::Saturday).is_none());
    }

    #[test]
    fn test_get_calendar_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_calendar("unknown") {
            Err(EngineError::CalendarNotFound { id }) => assert_eq!(id, "unknown"),
            other => panic!("Expected CalendarNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_id_defaults_to_file_stem() {
        let dir = ScratchDir::new("name: scratch\n");
        dir.calendar("line_a.yaml", "time_zone: UTC\ndays: {}\n");

        let loader = ConfigLoader::load(&dir.0).unwrap();
        let calendar = loader.get_calendar("line_a").unwrap();
        assert_eq!(calendar.id.as_deref(), Some("line_a"));
        assert!(loader.settings().max_query_days.is_none());
    }

    #[test]
    fn test_duplicate_calendar_ids_are_rejected() {
        let dir = ScratchDir::new("name: scratch\n");
        dir.calendar("a.yaml", "id: shared\ntime_zone: UTC\n")
            .calendar("b.yaml", "id: shared\ntime_zone: UTC\n");

        match ConfigLoader::load(&dir.0) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("shared"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_calendar_fails_loading() {
        let dir = ScratchDir::new("name: scratch\n");
        dir.calendar(
            "broken.yaml",
            "time_zone: UTC\ndays:\n  monday:\n    blocks:\n      - start: \"8am\"\n        end: \"16:00\"\n",
        );

        match ConfigLoader::load(&dir.0) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("broken.yaml"));
                assert!(message.contains("8am"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = ScratchDir::new("name: [unclosed\n");
        assert!(matches!(
            ConfigLoader::load(&dir.0),
            Err(EngineError::ConfigParseError { .. })
        ));
    }
}
