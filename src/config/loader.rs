//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the dashboard
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{DashboardError, DashboardResult};

use super::types::{BackendConfig, CalendarConfig, DashboardConfig, ServerConfig};

/// Loads and provides access to the dashboard configuration.
///
/// Every section of the file is optional; missing sections take their
/// defaults (in-memory backend, Sunday-first calendar, three entries per day).
///
/// # Example
///
/// ```no_run
/// use bizdash::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dashboard.yaml").unwrap();
/// println!("Binding to {}", loader.server().bind_addr);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: DashboardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid YAML or unknown backend kinds
    pub fn load<P: AsRef<Path>>(path: P) -> DashboardResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| DashboardError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text; `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> DashboardResult<Self> {
        let config =
            serde_yaml::from_str(content).map_err(|e| DashboardError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the data backend settings.
    pub fn backend(&self) -> &BackendConfig {
        &self.config.backend
    }

    /// Returns the calendar settings.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.config.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn config_path() -> &'static str {
        "./config/dashboard.yaml"
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.server().bind_addr, "127.0.0.1:8080");
        assert!(matches!(loader.backend(), BackendConfig::Memory));
        assert_eq!(loader.calendar().week_start, Weekday::Sun);
        assert_eq!(loader.calendar().max_items_per_day, 3);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/dashboard.yaml");

        match result {
            Err(DashboardError::ConfigNotFound { path }) => {
                assert!(path.contains("dashboard.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_yaml_returns_parse_error() {
        let result = ConfigLoader::parse("calendar: [unclosed", "inline");

        match result {
            Err(DashboardError::ConfigParseError { path, .. }) => assert_eq!(path, "inline"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_backend_kind_returns_parse_error() {
        let result = ConfigLoader::parse("backend:\n  kind: carrier_pigeon\n", "inline");
        assert!(matches!(result, Err(DashboardError::ConfigParseError { .. })));
    }

    #[test]
    fn test_default_matches_empty_file() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.calendar(), &CalendarConfig::default());
    }
}
