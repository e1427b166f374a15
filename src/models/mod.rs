//! Core data models for the dashboard.
//!
//! Each record type maps to one backend table and is validated when rows
//! are decoded at the data source boundary.

mod deal;
mod lead;
mod leave_span;
mod payroll;
mod work_item;

pub use deal::{Deal, DealStage, NewDeal};
pub use lead::{Lead, LeadStatus, NewLead};
pub(crate) use leave_span::check_interval;
pub use leave_span::{LeaveSpan, LeaveStatus, LeaveType, NewLeaveSpan};
pub use payroll::{NewPayroll, PayrollChanges, PayrollRecord};
pub use work_item::{NewWorkItem, TaskPriority, TaskStatus, WorkItem};
