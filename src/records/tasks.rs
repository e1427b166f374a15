//! Task operations.

use tracing::info;
use uuid::Uuid;

use crate::aggregate::filter_by_title;
use crate::error::DashboardResult;
use crate::models::{NewWorkItem, TaskStatus, WorkItem};
use crate::source::{DataSource, Query, Record};

use super::{insert, list, patch, require_title, row_for, update};

/// Lists tasks soonest due first, keeping those whose title contains
/// `search`. Undated tasks come last.
pub async fn list_tasks<S>(source: &S, search: Option<&str>) -> DashboardResult<Vec<WorkItem>>
where
    S: DataSource + ?Sized,
{
    let items: Vec<WorkItem> =
        list(source, Query::table(WorkItem::TABLE).order_by("due_date", true)).await?;
    Ok(match search {
        Some(search) => filter_by_title(items, search),
        None => items,
    })
}

/// Creates a task. The title must not be blank.
pub async fn create_task<S>(source: &S, new: NewWorkItem) -> DashboardResult<WorkItem>
where
    S: DataSource + ?Sized,
{
    let new = NewWorkItem {
        title: require_title(&new.title)?,
        ..new
    };
    let item: WorkItem = insert(source, row_for::<WorkItem>(&new)?).await?;
    info!(task_id = %item.id, "Task created");
    Ok(item)
}

/// Moves a task to `status`.
pub async fn set_task_status<S>(
    source: &S,
    id: Uuid,
    status: TaskStatus,
) -> DashboardResult<WorkItem>
where
    S: DataSource + ?Sized,
{
    update(source, id, patch("status", status)?).await
}
