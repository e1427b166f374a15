//! In-process data source.
//!
//! Holds every table as a vector of rows behind an async lock. Used for
//! local runs without a hosted backend and throughout the test suite.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::DashboardResult;

use super::query::stored_decimal;
use super::{DataSource, Query, Row, Table};

/// A thread-safe in-memory backend.
///
/// Rows keep their insertion order, which is the order `select` returns
/// when the query does not ask for one.
#[derive(Debug, Default)]
pub struct InMemorySource {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rows to a table verbatim, without assigning ids.
    pub async fn seed(&self, table: Table, rows: impl IntoIterator<Item = Row>) {
        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().extend(rows);
    }

    /// Returns the number of rows stored in a table.
    pub async fn len(&self, table: Table) -> usize {
        self.tables
            .read()
            .await
            .get(&table)
            .map_or(0, |rows| rows.len())
    }
}

/// Ordering key of a stored value.
///
/// Numbers, whether JSON numbers or decimal strings such as stored money,
/// compare numerically and sort before everything else, which compares as
/// text.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(Decimal),
    Text(String),
}

fn sort_key(value: &Value) -> SortKey {
    match (stored_decimal(value), value) {
        (Some(number), _) => SortKey::Number(number),
        (None, Value::String(text)) => SortKey::Text(text.clone()),
        (None, other) => SortKey::Text(other.to_string()),
    }
}

/// Orders stored values the way the hosted backend does: nulls sort after
/// every other value.
fn compare_stored(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => sort_key(x).cmp(&sort_key(y)),
    }
}

fn row_id(row: &Row) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[async_trait]
impl DataSource for InMemorySource {
    async fn select(&self, query: &Query) -> DashboardResult<Vec<Row>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|row| query.matches(row)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_stored(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        debug!(table = %query.table, rows = rows.len(), "In-memory select");
        Ok(rows)
    }

    async fn insert(&self, table: Table, mut row: Row) -> DashboardResult<Row> {
        if row.get("id").is_none_or(Value::is_null) {
            row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        if row.get("created_at").is_none_or(Value::is_null) {
            row.insert("created_at".to_string(), Value::String(Utc::now().to_rfc3339()));
        }

        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: Uuid, patch: Row) -> DashboardResult<Option<Row>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
        else {
            return Ok(None);
        };

        for (column, value) in patch {
            if column != "id" {
                row.insert(column, value);
            }
        }
        Ok(Some(row.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let source = InMemorySource::new();

        let stored = source
            .insert(Table::Leads, row(json!({"title": "Acme renewal"})))
            .await
            .unwrap();

        assert!(row_id(&stored).is_some());
        assert!(stored.get("created_at").and_then(Value::as_str).is_some());
        assert_eq!(source.len(Table::Leads).await, 1);
    }

    #[tokio::test]
    async fn test_insert_keeps_supplied_id() {
        let source = InMemorySource::new();
        let id = Uuid::from_u128(42);

        let stored = source
            .insert(Table::Tasks, row(json!({"id": id.to_string(), "title": "t"})))
            .await
            .unwrap();

        assert_eq!(row_id(&stored), Some(id));
    }

    #[tokio::test]
    async fn test_select_preserves_insertion_order_without_ordering() {
        let source = InMemorySource::new();
        source
            .seed(
                Table::Tasks,
                vec![
                    row(json!({"title": "b"})),
                    row(json!({"title": "a"})),
                    row(json!({"title": "c"})),
                ],
            )
            .await;

        let rows = source.select(&Query::table(Table::Tasks)).await.unwrap();
        let titles: Vec<&str> = rows.iter().filter_map(|r| r["title"].as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_select_orders_with_nulls_last_ascending() {
        let source = InMemorySource::new();
        source
            .seed(
                Table::Tasks,
                vec![
                    row(json!({"title": "none", "due_date": null})),
                    row(json!({"title": "late", "due_date": "2024-03-20"})),
                    row(json!({"title": "early", "due_date": "2024-03-02"})),
                ],
            )
            .await;

        let rows = source
            .select(&Query::table(Table::Tasks).order_by("due_date", true))
            .await
            .unwrap();
        let titles: Vec<&str> = rows.iter().filter_map(|r| r["title"].as_str()).collect();
        assert_eq!(titles, vec!["early", "late", "none"]);
    }

    #[tokio::test]
    async fn test_select_orders_decimal_strings_numerically() {
        let source = InMemorySource::new();
        source
            .seed(
                Table::Payroll,
                vec![
                    row(json!({"employee": "a", "net_salary": "9000.00"})),
                    row(json!({"employee": "b", "net_salary": "10000.00"})),
                    row(json!({"employee": "c", "net_salary": 950.5})),
                ],
            )
            .await;

        let rows = source
            .select(&Query::table(Table::Payroll).order_by("net_salary", false))
            .await
            .unwrap();
        let employees: Vec<&str> = rows.iter().filter_map(|r| r["employee"].as_str()).collect();
        assert_eq!(employees, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_select_applies_filters_and_limit() {
        let source = InMemorySource::new();
        source
            .seed(
                Table::Deals,
                vec![
                    row(json!({"title": "small", "value": "100"})),
                    row(json!({"title": "big", "value": "5000"})),
                    row(json!({"title": "bigger", "value": "9000"})),
                ],
            )
            .await;

        let query = Query::table(Table::Deals)
            .gte("value", 1000_i64)
            .order_by("title", true)
            .limit(1);
        let rows = source.select(&query).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], json!("big"));
    }

    #[tokio::test]
    async fn test_update_merges_patch_but_not_id() {
        let source = InMemorySource::new();
        let id = Uuid::from_u128(1);
        source
            .seed(
                Table::LeaveRequests,
                vec![row(json!({"id": id.to_string(), "status": "pending"}))],
            )
            .await;

        let updated = source
            .update(
                Table::LeaveRequests,
                id,
                row(json!({"status": "approved", "id": Uuid::from_u128(2).to_string()})),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["status"], json!("approved"));
        assert_eq!(row_id(&updated), Some(id));
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_none() {
        let source = InMemorySource::new();

        let result = source
            .update(Table::Payroll, Uuid::from_u128(9), Row::new())
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
