//! Payroll operations.
//!
//! The net salary column is always computed here from the other amounts;
//! callers never supply it.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::aggregate::{PayrollSummary, apply_changes, net_salary, summarize};
use crate::error::DashboardResult;
use crate::models::{NewPayroll, PayrollChanges, PayrollRecord};
use crate::source::{DataSource, Query, Record, Row};

use super::{fetch_by_id, insert, list, row_for, update};

/// Payroll records together with their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollReport {
    /// Records, newest month first.
    pub records: Vec<PayrollRecord>,
    /// Totals over `records`.
    pub summary: PayrollSummary,
}

/// Lists payroll records, newest month first.
pub async fn list_payroll<S>(source: &S) -> DashboardResult<Vec<PayrollRecord>>
where
    S: DataSource + ?Sized,
{
    list(source, Query::table(PayrollRecord::TABLE).order_by("month", false)).await
}

/// Lists payroll records with their totals.
pub async fn payroll_report<S>(source: &S) -> DashboardResult<PayrollReport>
where
    S: DataSource + ?Sized,
{
    let records = list_payroll(source).await?;
    let summary = summarize(&records);
    Ok(PayrollReport { records, summary })
}

/// Creates a payroll record, computing its net salary.
pub async fn create_payroll<S>(source: &S, new: NewPayroll) -> DashboardResult<PayrollRecord>
where
    S: DataSource + ?Sized,
{
    let net = net_salary(new.base_salary, new.bonus, new.deductions)?;

    let mut row = row_for::<PayrollRecord>(&new)?;
    row.insert("net_salary".to_string(), money(net));

    let record: PayrollRecord = insert(source, row).await?;
    info!(
        payroll_id = %record.id,
        employee_id = %record.employee_id,
        net_salary = %record.net_salary,
        "Payroll record created"
    );
    Ok(record)
}

/// Applies a partial update and recomputes the net salary.
///
/// The current amounts are read first and merged with `changes`; the write
/// is not atomic with that read.
pub async fn update_payroll<S>(
    source: &S,
    id: Uuid,
    changes: PayrollChanges,
) -> DashboardResult<PayrollRecord>
where
    S: DataSource + ?Sized,
{
    let current: PayrollRecord = fetch_by_id(source, id).await?;
    let merged = apply_changes(&current, &changes)?;

    let mut patch = Row::new();
    patch.insert("base_salary".to_string(), money(merged.base_salary));
    patch.insert("bonus".to_string(), money(merged.bonus));
    patch.insert("deductions".to_string(), money(merged.deductions));
    patch.insert("net_salary".to_string(), money(merged.net_salary));

    let record: PayrollRecord = update(source, id, patch).await?;
    info!(payroll_id = %record.id, net_salary = %record.net_salary, "Payroll record updated");
    Ok(record)
}

fn money(amount: Decimal) -> Value {
    Value::String(amount.to_string())
}
