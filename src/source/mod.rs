//! The data collaborator: the hosted backend that owns every table.
//!
//! The dashboard never persists anything itself. All reads and writes go
//! through a [`DataSource`], which exposes generic select/insert/update
//! operations over named tables. Rows cross the seam untyped and are
//! validated into tagged records by [`decode_row`] and [`decode_rows`].

mod memory;
mod query;
mod record;
mod rest;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DashboardResult;

pub use memory::InMemorySource;
pub use query::{Filter, FilterOp, FilterValue, Order, Query};
pub use record::{Record, decode_row, decode_rows, encode_row};
pub use rest::{RestSource, query_params};

/// An untyped row as exchanged with the backend.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The fixed tables the dashboard works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// People the business deals with.
    Contacts,
    /// Organisations contacts belong to.
    Companies,
    /// Sales opportunities in the pipeline.
    Deals,
    /// Unqualified sales prospects.
    Leads,
    /// Scheduled work items.
    Tasks,
    /// Employee time-off spans.
    LeaveRequests,
    /// Monthly salary records.
    Payroll,
}

impl Table {
    /// Returns the backend table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Contacts => "contacts",
            Table::Companies => "companies",
            Table::Deals => "deals",
            Table::Leads => "leads",
            Table::Tasks => "tasks",
            Table::LeaveRequests => "leave_requests",
            Table::Payroll => "payroll",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generic table access offered by the hosted backend.
///
/// Row-level security and durability are the backend's concern; an
/// implementation only has to translate these calls into its own protocol.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Returns the rows matching `query`, in the backend's order unless the
    /// query specifies one.
    async fn select(&self, query: &Query) -> DashboardResult<Vec<Row>>;

    /// Stores a new row and returns it as stored, including any columns the
    /// backend fills in (`id`, `created_at`).
    async fn insert(&self, table: Table, row: Row) -> DashboardResult<Row>;

    /// Merges `patch` into the row with the given id and returns the updated
    /// row, or `None` when no such row exists.
    async fn update(&self, table: Table, id: Uuid, patch: Row) -> DashboardResult<Option<Row>>;
}
