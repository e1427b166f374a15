//! Configuration loading and management for the dashboard.
//!
//! This module loads the YAML configuration file that selects the data
//! backend, the HTTP bind address and the calendar grid options.
//!
//! # Example
//!
//! ```no_run
//! use bizdash::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/dashboard.yaml").unwrap();
//! println!("Week starts on {}", config.calendar().week_start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BackendConfig, CalendarConfig, DashboardConfig, RestBackendConfig, ServerConfig};
