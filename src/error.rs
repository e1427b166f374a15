//! Error types for the dashboard core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while talking to the data
//! backend, validating records, and computing aggregates.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the dashboard core.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use bizdash::error::DashboardError;
///
/// let error = DashboardError::ConfigNotFound {
///     path: "/missing/dashboard.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/dashboard.yaml");
/// ```
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A year/month pair does not name a representable calendar month.
    #[error("Invalid month {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// A day number does not exist in the requested month.
    #[error("Invalid day {day} for month {year}-{month}")]
    InvalidDay {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
        /// The requested day of month.
        day: u32,
    },

    /// Caller-supplied input failed validation.
    #[error("Invalid field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A row returned by the data backend could not be decoded into a record.
    #[error("Invalid row in table '{table}': {message}")]
    InvalidRecord {
        /// The table the row came from.
        table: String,
        /// A description of what made the row invalid.
        message: String,
    },

    /// A leave span has an end date before its start date.
    #[error("Invalid leave span: end date {end_date} is before start date {start_date}")]
    InvalidLeaveSpan {
        /// The first day of leave.
        start_date: NaiveDate,
        /// The last day of leave.
        end_date: NaiveDate,
    },

    /// A payroll amount was rejected.
    #[error("Invalid payroll field '{field}': {message}")]
    InvalidPayroll {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No record with the given id exists in the table.
    #[error("Record '{id}' not found in table '{table}'")]
    NotFound {
        /// The table that was searched.
        table: String,
        /// The id that was requested.
        id: String,
    },

    /// A status change is not allowed from the record's current status.
    #[error("Cannot change status from '{from}' to '{to}'")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// The data backend failed to serve a request.
    #[error("Data source error on table '{table}': {message}")]
    Source {
        /// The table the request targeted.
        table: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return DashboardError.
pub type DashboardResult<T> = Result<T, DashboardError>;
