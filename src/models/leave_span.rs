//! Leave span model.
//!
//! A leave span is an inclusive date interval during which an employee is
//! unavailable. Spans are stored in the `leave_requests` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DashboardError, DashboardResult};
use crate::source::{Record, Table};

/// Kind of leave taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    /// Paid annual leave.
    #[default]
    Annual,
    /// Sick leave.
    Sick,
    /// Unpaid leave.
    Unpaid,
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Granted.
    Approved,
    /// Declined.
    Rejected,
}

impl LeaveStatus {
    /// Returns the status as stored in the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

/// An inclusive date interval during which an employee is unavailable.
///
/// # Example
///
/// ```
/// use bizdash::models::{LeaveSpan, LeaveStatus, LeaveType};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let span = LeaveSpan {
///     id: Uuid::from_u128(1),
///     employee_id: Uuid::from_u128(100),
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
///     leave_type: LeaveType::Annual,
///     status: LeaveStatus::Approved,
/// };
///
/// assert!(span.covers(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()));
/// assert_eq!(span.days(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSpan {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee on leave.
    pub employee_id: Uuid,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Kind of leave.
    #[serde(default)]
    pub leave_type: LeaveType,
    /// Approval state.
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveSpan {
    /// Returns true if `date` falls within the span, inclusive of both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns the number of calendar days in the span.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Rejects intervals whose end precedes their start.
pub(crate) fn check_interval(start_date: NaiveDate, end_date: NaiveDate) -> DashboardResult<()> {
    if start_date > end_date {
        return Err(DashboardError::InvalidLeaveSpan {
            start_date,
            end_date,
        });
    }
    Ok(())
}

impl Record for LeaveSpan {
    const TABLE: Table = Table::LeaveRequests;

    fn validate(&self) -> DashboardResult<()> {
        check_interval(self.start_date, self.end_date)
    }
}

/// Fields accepted when requesting leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveSpan {
    /// The employee requesting leave.
    pub employee_id: Uuid,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Kind of leave.
    #[serde(default)]
    pub leave_type: LeaveType,
    /// Optional free-text reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
