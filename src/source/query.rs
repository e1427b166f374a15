//! Table-scoped query description.
//!
//! A [`Query`] names a table, a list of column filters, an optional ordering
//! and an optional row limit. It is backend-neutral: the in-memory source
//! evaluates it directly and the REST source renders it as query parameters.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::{Row, Table};

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Column equals the operand.
    Eq,
    /// Column is strictly less than the operand.
    Lt,
    /// Column is less than or equal to the operand.
    Lte,
    /// Column is strictly greater than the operand.
    Gt,
    /// Column is greater than or equal to the operand.
    Gte,
    /// Column contains the operand text, ignoring case.
    Contains,
}

impl FilterOp {
    /// Returns the operator name used in REST query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Contains => "ilike",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Contains => false,
        }
    }
}

/// A typed filter operand.
///
/// Operands carry their type so that comparisons against stored values are
/// unambiguous: a [`FilterValue::Date`] compares against the date portion of
/// the stored value, so `2024-03-31T15:00:00Z` is on `2024-03-31`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Exact decimal (money).
    Decimal(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Record identifier.
    Uuid(Uuid),
}

impl FilterValue {
    /// Renders the operand as it appears in a query string.
    pub fn to_query_string(&self) -> String {
        match self {
            FilterValue::Text(text) => text.clone(),
            FilterValue::Integer(n) => n.to_string(),
            FilterValue::Decimal(d) => d.to_string(),
            FilterValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            FilterValue::Uuid(id) => id.to_string(),
        }
    }

    /// Compares a stored value against this operand.
    ///
    /// Returns `None` when the stored value is null, missing, or cannot be
    /// read as the operand's type. Such rows never match a filter.
    pub fn compare(&self, stored: &Value) -> Option<Ordering> {
        match self {
            FilterValue::Text(text) => stored.as_str().map(|s| s.cmp(text.as_str())),
            FilterValue::Integer(n) => stored_decimal(stored).map(|d| d.cmp(&Decimal::from(*n))),
            FilterValue::Decimal(operand) => stored_decimal(stored).map(|d| d.cmp(operand)),
            FilterValue::Date(date) => stored_date(stored).map(|d| d.cmp(date)),
            FilterValue::Uuid(id) => stored
                .as_str()
                .and_then(|s| Uuid::parse_str(s).ok())
                .map(|stored_id| stored_id.cmp(id)),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self {
        FilterValue::Decimal(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        FilterValue::Uuid(value)
    }
}

/// Reads a stored number, accepting both JSON numbers and decimal strings.
pub(super) fn stored_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// Reads the date portion of a stored `YYYY-MM-DD` or RFC 3339 string.
fn stored_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// A single column predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// The column name.
    pub column: String,
    /// The comparison.
    pub op: FilterOp,
    /// The operand.
    pub value: FilterValue,
}

impl Filter {
    /// Returns true if the row satisfies this predicate.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(stored) = row.get(&self.column) else {
            return false;
        };
        if stored.is_null() {
            return false;
        }

        if self.op == FilterOp::Contains {
            let needle = self.value.to_query_string().to_lowercase();
            return match stored {
                Value::String(s) => s.to_lowercase().contains(&needle),
                other => other.to_string().to_lowercase().contains(&needle),
            };
        }

        self.value
            .compare(stored)
            .is_some_and(|ordering| self.op.accepts(ordering))
    }
}

/// Sort order for query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// The column to sort by.
    pub column: String,
    /// Ascending when true, descending otherwise.
    pub ascending: bool,
}

/// A read request against a single table.
///
/// # Example
///
/// ```
/// use bizdash::source::{Query, Table};
/// use chrono::NaiveDate;
///
/// let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let last = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// let query = Query::table(Table::Tasks)
///     .between("due_date", first, last)
///     .order_by("due_date", true);
///
/// assert_eq!(query.filters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The table to read from.
    pub table: Table,
    /// Predicates that must all hold.
    pub filters: Vec<Filter>,
    /// Optional result ordering.
    pub order: Option<Order>,
    /// Optional maximum number of rows.
    pub limit: Option<usize>,
}

impl Query {
    /// Starts a query that selects every row of `table`.
    pub fn table(table: Table) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    fn filter(mut self, column: &str, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    /// Adds `column = value`.
    pub fn eq(self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    /// Adds `column < value`.
    pub fn lt(self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, FilterOp::Lt, value)
    }

    /// Adds `column <= value`.
    pub fn lte(self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, FilterOp::Lte, value)
    }

    /// Adds `column > value`.
    pub fn gt(self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, FilterOp::Gt, value)
    }

    /// Adds `column >= value`.
    pub fn gte(self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, FilterOp::Gte, value)
    }

    /// Adds a case-insensitive substring match on `column`.
    pub fn contains(self, column: &str, text: &str) -> Self {
        self.filter(column, FilterOp::Contains, text)
    }

    /// Adds `low <= column <= high`.
    pub fn between(
        self,
        column: &str,
        low: impl Into<FilterValue>,
        high: impl Into<FilterValue>,
    ) -> Self {
        self.gte(column, low).lte(column, high)
    }

    /// Sets the result ordering.
    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    /// Caps the number of returned rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the row satisfies every filter.
    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|filter| filter.matches(row))
    }
}
