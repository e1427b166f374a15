//! Payroll arithmetic.
//!
//! Net salary is always derived from its parts:
//! `net_salary = base_salary + bonus - deductions`. Every amount must be
//! non-negative; the net itself may go negative when deductions exceed pay.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{PayrollChanges, PayrollRecord};

fn non_negative(field: &str, amount: Decimal) -> DashboardResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DashboardError::InvalidPayroll {
            field: field.to_string(),
            message: format!("must not be negative, got {}", amount),
        });
    }
    Ok(())
}

/// Computes net salary from its components.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidPayroll`] naming the first negative
/// component.
///
/// # Example
///
/// ```
/// use bizdash::aggregate::net_salary;
/// use rust_decimal::Decimal;
///
/// let net = net_salary(
///     Decimal::new(50000, 0),
///     Decimal::new(5000, 0),
///     Decimal::new(2000, 0),
/// )
/// .unwrap();
/// assert_eq!(net, Decimal::new(53000, 0));
/// ```
pub fn net_salary(
    base_salary: Decimal,
    bonus: Decimal,
    deductions: Decimal,
) -> DashboardResult<Decimal> {
    non_negative("base_salary", base_salary)?;
    non_negative("bonus", bonus)?;
    non_negative("deductions", deductions)?;
    Ok(base_salary + bonus - deductions)
}

/// Merges a partial update into a record and recomputes its net salary.
///
/// Fields left as `None` keep their current value.
pub fn apply_changes(
    current: &PayrollRecord,
    changes: &PayrollChanges,
) -> DashboardResult<PayrollRecord> {
    let base_salary = changes.base_salary.unwrap_or(current.base_salary);
    let bonus = changes.bonus.unwrap_or(current.bonus);
    let deductions = changes.deductions.unwrap_or(current.deductions);
    let net_salary = net_salary(base_salary, bonus, deductions)?;

    Ok(PayrollRecord {
        base_salary,
        bonus,
        deductions,
        net_salary,
        ..current.clone()
    })
}

/// Column totals over a set of payroll records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollSummary {
    /// Number of records summed.
    pub count: usize,
    /// Sum of base salaries.
    pub total_base: Decimal,
    /// Sum of bonuses.
    pub total_bonus: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
}

/// Sums the money columns of `records`.
pub fn summarize<'a>(records: impl IntoIterator<Item = &'a PayrollRecord>) -> PayrollSummary {
    records
        .into_iter()
        .fold(PayrollSummary::default(), |mut summary, record| {
            summary.count += 1;
            summary.total_base += record.base_salary;
            summary.total_bonus += record.bonus;
            summary.total_deductions += record.deductions;
            summary.total_net += record.net_salary;
            summary
        })
}
