//! Leave request operations.
//!
//! Requests start as `pending`. Approval and rejection are only allowed
//! from `pending`; a decided request cannot be decided again.

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{LeaveSpan, LeaveStatus, NewLeaveSpan, check_interval};
use crate::source::{DataSource, Query, Record};

use super::{fetch_by_id, insert, list, patch, row_for, update};

/// Submits a leave request for approval.
pub async fn request_leave<S>(source: &S, new: NewLeaveSpan) -> DashboardResult<LeaveSpan>
where
    S: DataSource + ?Sized,
{
    check_interval(new.start_date, new.end_date)?;

    let mut row = row_for::<LeaveSpan>(&new)?;
    row.insert(
        "status".to_string(),
        Value::String(LeaveStatus::Pending.as_str().to_string()),
    );

    let leave: LeaveSpan = insert(source, row).await?;
    info!(
        leave_id = %leave.id,
        employee_id = %leave.employee_id,
        days = leave.days(),
        "Leave requested"
    );
    Ok(leave)
}

/// Approves a pending leave request.
pub async fn approve_leave<S>(source: &S, id: Uuid) -> DashboardResult<LeaveSpan>
where
    S: DataSource + ?Sized,
{
    decide(source, id, LeaveStatus::Approved).await
}

/// Rejects a pending leave request.
pub async fn reject_leave<S>(source: &S, id: Uuid) -> DashboardResult<LeaveSpan>
where
    S: DataSource + ?Sized,
{
    decide(source, id, LeaveStatus::Rejected).await
}

// Read then write; two deciders racing on one request both see `pending`.
async fn decide<S>(source: &S, id: Uuid, decision: LeaveStatus) -> DashboardResult<LeaveSpan>
where
    S: DataSource + ?Sized,
{
    let current: LeaveSpan = fetch_by_id(source, id).await?;
    if current.status != LeaveStatus::Pending {
        return Err(DashboardError::InvalidTransition {
            from: current.status.as_str().to_string(),
            to: decision.as_str().to_string(),
        });
    }

    let leave: LeaveSpan = update(source, id, patch("status", decision)?).await?;
    info!(leave_id = %leave.id, status = leave.status.as_str(), "Leave decided");
    Ok(leave)
}

/// Lists an employee's leave, most recent first.
pub async fn leave_for_employee<S>(source: &S, employee_id: Uuid) -> DashboardResult<Vec<LeaveSpan>>
where
    S: DataSource + ?Sized,
{
    let query = Query::table(LeaveSpan::TABLE)
        .eq("employee_id", employee_id)
        .order_by("start_date", false);
    list(source, query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveType;
    use crate::source::InMemorySource;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_leave(employee: u128, start: NaiveDate, end: NaiveDate) -> NewLeaveSpan {
        NewLeaveSpan {
            employee_id: Uuid::from_u128(employee),
            start_date: start,
            end_date: end,
            leave_type: LeaveType::Annual,
            reason: Some("holiday".to_string()),
        }
    }

    #[tokio::test]
    async fn test_request_starts_pending() {
        let source = InMemorySource::new();

        let leave = request_leave(&source, new_leave(1, date(2024, 3, 5), date(2024, 3, 8)))
            .await
            .unwrap();

        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.days(), 4);
    }

    #[tokio::test]
    async fn test_request_rejects_reversed_dates() {
        let source = InMemorySource::new();

        let result = request_leave(&source, new_leave(1, date(2024, 3, 8), date(2024, 3, 5))).await;

        assert!(matches!(result, Err(DashboardError::InvalidLeaveSpan { .. })));
        assert_eq!(source.len(LeaveSpan::TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_approve_then_reject_is_invalid() {
        let source = InMemorySource::new();
        let leave = request_leave(&source, new_leave(1, date(2024, 3, 5), date(2024, 3, 5)))
            .await
            .unwrap();

        let approved = approve_leave(&source, leave.id).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);

        let result = reject_leave(&source, leave.id).await;
        match result {
            Err(DashboardError::InvalidTransition { from, to }) => {
                assert_eq!(from, "approved");
                assert_eq!(to, "rejected");
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reject_pending() {
        let source = InMemorySource::new();
        let leave = request_leave(&source, new_leave(1, date(2024, 3, 5), date(2024, 3, 6)))
            .await
            .unwrap();

        let rejected = reject_leave(&source, leave.id).await.unwrap();

        assert_eq!(rejected.status, LeaveStatus::Rejected);
    }

    #[tokio::test]
    async fn test_decide_unknown_request() {
        let source = InMemorySource::new();

        let result = approve_leave(&source, Uuid::from_u128(42)).await;

        assert!(matches!(result, Err(DashboardError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_leave_for_employee_newest_first() {
        let source = InMemorySource::new();
        request_leave(&source, new_leave(1, date(2024, 1, 2), date(2024, 1, 3))).await.unwrap();
        request_leave(&source, new_leave(2, date(2024, 2, 2), date(2024, 2, 3))).await.unwrap();
        request_leave(&source, new_leave(1, date(2024, 5, 2), date(2024, 5, 3))).await.unwrap();

        let spans = leave_for_employee(&source, Uuid::from_u128(1)).await.unwrap();

        let starts: Vec<NaiveDate> = spans.iter().map(|s| s.start_date).collect();
        assert_eq!(starts, vec![date(2024, 5, 2), date(2024, 1, 2)]);
    }
}
