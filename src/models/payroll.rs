//! Payroll record model.
//!
//! All money is held as [`Decimal`] to keep salary arithmetic exact.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::{Record, Table};

/// One employee's pay for one month.
///
/// `net_salary` is always `base_salary + bonus - deductions`; it is computed
/// by the payroll operations, never taken from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The pay month, as its first day.
    pub month: NaiveDate,
    /// Contractual salary for the month.
    pub base_salary: Decimal,
    /// Additional pay.
    #[serde(default)]
    pub bonus: Decimal,
    /// Amounts withheld.
    #[serde(default)]
    pub deductions: Decimal,
    /// Amount paid out.
    pub net_salary: Decimal,
}

impl Record for PayrollRecord {
    const TABLE: Table = Table::Payroll;
}

/// Fields accepted when creating a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayroll {
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The pay month.
    pub month: NaiveDate,
    /// Contractual salary for the month.
    pub base_salary: Decimal,
    /// Additional pay.
    #[serde(default)]
    pub bonus: Decimal,
    /// Amounts withheld.
    #[serde(default)]
    pub deductions: Decimal,
}

/// A partial update to a payroll record's amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollChanges {
    /// New base salary, if changing.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// New bonus, if changing.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// New deductions, if changing.
    #[serde(default)]
    pub deductions: Option<Decimal>,
}
