//! Day bucketing.
//!
//! Assigns fetched events to the day or days they cover. Bucketing is a
//! stable filter: the events for a day keep the relative order in which the
//! collaborator returned them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{LeaveSpan, WorkItem};

use super::fetch::MonthEvents;
use super::range::MonthRange;

/// The events overlapping a single day.
///
/// Derived on demand from [`MonthEvents`] and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary<'a> {
    /// The day summarised.
    pub date: NaiveDate,
    /// Work items due on the day.
    pub work_items: Vec<&'a WorkItem>,
    /// Leave spans covering the day.
    pub leave_spans: Vec<&'a LeaveSpan>,
}

impl DaySummary<'_> {
    /// Total number of events on the day.
    pub fn len(&self) -> usize {
        self.work_items.len() + self.leave_spans.len()
    }

    /// Returns true if nothing happens on the day.
    pub fn is_empty(&self) -> bool {
        self.work_items.is_empty() && self.leave_spans.is_empty()
    }
}

/// Collects the events that overlap `date`.
///
/// A work item belongs to the day its due date names. A leave span belongs
/// to every day from its start to its end, inclusive.
///
/// # Example
///
/// ```
/// use bizdash::calendar::{MonthEvents, bucketize};
/// use bizdash::models::{LeaveSpan, LeaveStatus, LeaveType};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let span = LeaveSpan {
///     id: Uuid::from_u128(1),
///     employee_id: Uuid::from_u128(100),
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
///     leave_type: LeaveType::Annual,
///     status: LeaveStatus::Approved,
/// };
/// let events = MonthEvents::new(vec![], vec![span]);
///
/// let day = bucketize(&events, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
/// assert_eq!(day.leave_spans.len(), 1);
/// ```
pub fn bucketize(events: &MonthEvents, date: NaiveDate) -> DaySummary<'_> {
    DaySummary {
        date,
        work_items: events
            .work_items
            .iter()
            .filter(|item| item.is_due_on(date))
            .collect(),
        leave_spans: events
            .leave_spans
            .iter()
            .filter(|span| span.covers(date))
            .collect(),
    }
}

/// Collects the events for day `day` of the displayed month.
///
/// Returns [`DashboardError::InvalidDay`] when the month has no such day.
pub fn bucketize_day<'a>(
    events: &'a MonthEvents,
    range: &MonthRange,
    day: u32,
) -> DashboardResult<DaySummary<'a>> {
    let date = range.date(day).ok_or(DashboardError::InvalidDay {
        year: range.month.year(),
        month: range.month.month(),
        day,
    })?;
    Ok(bucketize(events, date))
}
