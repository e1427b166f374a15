//! Create, read and update operations per table.
//!
//! Each operation runs against any [`DataSource`], decodes what comes back
//! into typed records and propagates backend failures. Unlike the calendar
//! fetch, nothing here swallows errors.

mod deals;
mod leads;
mod leave;
mod payroll;
mod tasks;

pub use deals::{create_deal, list_deals, move_deal, pipeline};
pub use leads::{create_lead, list_leads};
pub use leave::{approve_leave, leave_for_employee, reject_leave, request_leave};
pub use payroll::{PayrollReport, create_payroll, list_payroll, payroll_report, update_payroll};
pub use tasks::{create_task, list_tasks, set_task_status};

use serde::Serialize;
use uuid::Uuid;

use crate::error::{DashboardError, DashboardResult};
use crate::source::{DataSource, Query, Record, Row, decode_row, decode_rows, encode_row};

async fn list<T, S>(source: &S, query: Query) -> DashboardResult<Vec<T>>
where
    T: Record,
    S: DataSource + ?Sized,
{
    let rows = source.select(&query).await?;
    Ok(decode_rows(rows))
}

async fn fetch_by_id<T, S>(source: &S, id: Uuid) -> DashboardResult<T>
where
    T: Record,
    S: DataSource + ?Sized,
{
    let query = Query::table(T::TABLE).eq("id", id).limit(1);
    let row = source
        .select(&query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| not_found::<T>(id))?;
    decode_row(row)
}

async fn insert<T, S>(source: &S, row: Row) -> DashboardResult<T>
where
    T: Record,
    S: DataSource + ?Sized,
{
    let stored = source.insert(T::TABLE, row).await?;
    decode_row(stored)
}

async fn update<T, S>(source: &S, id: Uuid, patch: Row) -> DashboardResult<T>
where
    T: Record,
    S: DataSource + ?Sized,
{
    match source.update(T::TABLE, id, patch).await? {
        Some(row) => decode_row(row),
        None => Err(not_found::<T>(id)),
    }
}

fn not_found<T: Record>(id: Uuid) -> DashboardError {
    DashboardError::NotFound {
        table: T::TABLE.to_string(),
        id: id.to_string(),
    }
}

/// Serializes a payload into a row for table `T`.
fn row_for<T: Record>(payload: &impl Serialize) -> DashboardResult<Row> {
    encode_row(T::TABLE, payload)
}

/// Builds a single-column patch.
fn patch(column: &str, value: impl Serialize) -> DashboardResult<Row> {
    let value = serde_json::to_value(value).map_err(|e| DashboardError::InvalidInput {
        field: column.to_string(),
        message: e.to_string(),
    })?;
    let mut row = Row::new();
    row.insert(column.to_string(), value);
    Ok(row)
}

/// Rejects blank titles and returns the trimmed title.
fn require_title(title: &str) -> DashboardResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::InvalidInput {
            field: "title".to_string(),
            message: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkItem;
    use crate::source::{InMemorySource, Table};
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_by_id_not_found() {
        let source = InMemorySource::new();

        let result = fetch_by_id::<WorkItem, _>(&source, Uuid::from_u128(9)).await;

        assert!(matches!(
            result,
            Err(DashboardError::NotFound { ref table, .. }) if table == "tasks"
        ));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let source = InMemorySource::new();
        let patch = patch("title", "renamed").unwrap();

        let result = update::<WorkItem, _>(&source, Uuid::from_u128(9), patch).await;

        assert!(matches!(result, Err(DashboardError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_insert_returns_decoded_record() {
        let source = InMemorySource::new();
        let row = json!({"title": "write report"}).as_object().unwrap().clone();

        let item: WorkItem = insert(&source, row).await.unwrap();

        assert_eq!(item.title, "write report");
        assert_eq!(source.len(Table::Tasks).await, 1);
    }

    #[test]
    fn test_require_title() {
        assert_eq!(require_title("  Call Acme ").unwrap(), "Call Acme");
        assert!(matches!(
            require_title("   "),
            Err(DashboardError::InvalidInput { ref field, .. }) if field == "title"
        ));
    }
}
