//! Configuration types for the dashboard.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::Weekday;
use serde::Deserialize;

use crate::calendar::DEFAULT_MAX_ITEMS_PER_DAY;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Which data backend to talk to.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Calendar view settings.
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Data backend selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Keep all tables in process memory.
    #[default]
    Memory,
    /// Talk to the hosted backend over REST.
    Rest(RestBackendConfig),
}

/// Connection settings for the hosted REST backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RestBackendConfig {
    /// Base URL of the REST interface, e.g. `https://<project>.supabase.co/rest/v1`.
    pub base_url: String,
    /// API key; falls back to the `BIZDASH_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Calendar view settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarConfig {
    /// First column of the month grid.
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    /// Entries shown per day before the rest collapse into an overflow count.
    #[serde(default = "default_max_items_per_day")]
    pub max_items_per_day: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
            max_items_per_day: default_max_items_per_day(),
        }
    }
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

fn default_max_items_per_day() -> usize {
    DEFAULT_MAX_ITEMS_PER_DAY
}
