//! Derived aggregates over fetched records.
//!
//! Deal pipeline grouping, payroll net-salary arithmetic and totals, and
//! case-insensitive title search. Everything here is pure.

mod payroll;
mod pipeline;
mod search;

pub use payroll::{PayrollSummary, apply_changes, net_salary, summarize};
pub use pipeline::{Pipeline, PipelineColumn, group_by_stage};
pub use search::{Titled, filter_by_title};
