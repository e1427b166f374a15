//! Business dashboard core for CRM and HR data.
//!
//! This crate aggregates tasks and leave requests into a month calendar,
//! groups deals into a sales pipeline, computes payroll net salaries, and
//! exposes create/read/update operations over the dashboard's tables. All
//! storage is delegated to a [`source::DataSource`].

#![warn(missing_docs)]

pub mod aggregate;
pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod source;
