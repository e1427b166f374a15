//! Application state for the dashboard API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::{BackendConfig, CalendarConfig, ConfigLoader};
use crate::error::DashboardResult;
use crate::source::{DataSource, InMemorySource, RestSource};

/// Shared application state.
///
/// Holds the data backend every handler talks to and the calendar options.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn DataSource>,
    calendar: CalendarConfig,
}

impl AppState {
    /// Creates application state over an existing data source.
    pub fn new(source: Arc<dyn DataSource>, calendar: CalendarConfig) -> Self {
        Self { source, calendar }
    }

    /// Creates application state from loaded configuration, connecting the
    /// configured backend.
    pub fn from_config(config: &ConfigLoader) -> DashboardResult<Self> {
        let source: Arc<dyn DataSource> = match config.backend() {
            BackendConfig::Memory => {
                info!("Using in-memory data backend");
                Arc::new(InMemorySource::new())
            }
            BackendConfig::Rest(rest) => {
                info!(base_url = %rest.base_url, "Using REST data backend");
                Arc::new(RestSource::from_config(rest)?)
            }
        };
        Ok(Self::new(source, config.calendar().clone()))
    }

    /// Returns the data backend.
    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    /// Returns the calendar options.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_default_config_uses_memory_backend() {
        let config = ConfigLoader::load("./config/dashboard.yaml").unwrap();

        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.calendar(), config.calendar());
    }
}
