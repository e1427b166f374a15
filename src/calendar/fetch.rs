//! Range-bound event fetching.
//!
//! Both reads for a month are issued together and awaited jointly. A failed
//! read is logged and leaves its sequence empty; the calendar still renders
//! with whatever the other read returned.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::DashboardResult;
use crate::models::{LeaveSpan, WorkItem};
use crate::source::{DataSource, Query, Record, Row, Table, decode_rows};

use super::range::MonthRange;

/// The events fetched for one displayed month, in collaborator order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthEvents {
    /// Work items due within the month.
    pub work_items: Arc<[WorkItem]>,
    /// Leave spans overlapping the month.
    pub leave_spans: Arc<[LeaveSpan]>,
}

impl MonthEvents {
    /// Builds an event set from owned sequences.
    pub fn new(work_items: Vec<WorkItem>, leave_spans: Vec<LeaveSpan>) -> Self {
        MonthEvents {
            work_items: work_items.into(),
            leave_spans: leave_spans.into(),
        }
    }

    /// Returns true if neither sequence holds anything.
    pub fn is_empty(&self) -> bool {
        self.work_items.is_empty() && self.leave_spans.is_empty()
    }
}

/// Work items whose due date falls within the range.
pub fn work_item_query(range: &MonthRange) -> Query {
    Query::table(Table::Tasks).between("due_date", range.first_day, range.last_day)
}

/// Leave spans whose interval intersects the range.
pub fn leave_span_query(range: &MonthRange) -> Query {
    Query::table(Table::LeaveRequests)
        .lte("start_date", range.last_day)
        .gte("end_date", range.first_day)
}

/// Fetches the work items and leave spans for a month concurrently.
///
/// Never fails: a read that errors yields an empty sequence and a
/// warning-level log event. Rows that fail validation are dropped one by one.
pub async fn fetch_month<S>(source: &S, range: &MonthRange) -> MonthEvents
where
    S: DataSource + ?Sized,
{
    let work_query = work_item_query(range);
    let leave_query = leave_span_query(range);

    debug!(
        year = range.month.year(),
        month = range.month.month(),
        "Fetching calendar events"
    );

    let (work_rows, leave_rows) =
        tokio::join!(source.select(&work_query), source.select(&leave_query));

    MonthEvents::new(
        collect::<WorkItem>(work_rows, range),
        collect::<LeaveSpan>(leave_rows, range),
    )
}

fn collect<T: Record>(rows: DashboardResult<Vec<Row>>, range: &MonthRange) -> Vec<T> {
    match rows {
        Ok(rows) => decode_rows(rows),
        Err(error) => {
            warn!(
                table = %T::TABLE,
                year = range.month.year(),
                month = range.month.month(),
                error = %error,
                "Calendar fetch failed; showing no entries"
            );
            Vec::new()
        }
    }
}
