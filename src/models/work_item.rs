//! Work item (task) model.
//!
//! Work items are the scheduled units of work shown on the calendar. The
//! due date may arrive from the backend as a plain date or as a timestamp;
//! either way the calendar day is the date portion as written.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::{Record, Table};

/// Progress of a work item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns the status as stored in the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// Urgency of a work item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

/// A schedulable unit of work with an optional due date.
///
/// # Example
///
/// ```
/// use bizdash::models::WorkItem;
/// use chrono::NaiveDate;
///
/// let item: WorkItem = serde_json::from_str(r#"{
///     "id": "00000000-0000-0000-0000-000000000001",
///     "title": "Quarterly review",
///     "due_date": "2024-03-07T00:00:00Z"
/// }"#).unwrap();
///
/// assert!(item.is_due_on(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title shown on the calendar.
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Progress of the item.
    #[serde(default)]
    pub status: TaskStatus,
    /// Urgency of the item.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Calendar day the item is due, if scheduled.
    #[serde(default, deserialize_with = "due_date::deserialize")]
    pub due_date: Option<NaiveDate>,
}

impl WorkItem {
    /// Returns true if the item is due on `date`.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }
}

impl Record for WorkItem {
    const TABLE: Table = Table::Tasks;
}

/// Fields accepted when creating a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkItem {
    /// Short title; must not be blank.
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Urgency.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// The user creating the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
}

/// Reads a due date written either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp, keeping the date portion as written.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let prefix = raw
            .get(..10)
            .ok_or_else(|| D::Error::custom(format!("invalid due date '{}'", raw)))?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid due date '{}': {}", raw, e)))
    }
}
