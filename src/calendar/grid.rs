//! Month grid rendering.
//!
//! [`render`] lays a month out as whole weeks of seven cells: blank cells
//! before day 1, one cell per day, then blank cells to finish the last week.
//! Each day cell lists at most `max_items_per_day` entries and counts the
//! rest as overflow.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use uuid::Uuid;

use crate::config::CalendarConfig;
use crate::models::{LeaveType, TaskStatus};

use super::bucket::{DaySummary, bucketize};
use super::state::CalendarState;

/// Default number of entries listed in a day cell.
pub const DEFAULT_MAX_ITEMS_PER_DAY: usize = 3;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Entries listed per day before the rest are counted as overflow.
    pub max_items_per_day: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            max_items_per_day: DEFAULT_MAX_ITEMS_PER_DAY,
        }
    }
}

impl From<&CalendarConfig> for GridOptions {
    fn from(config: &CalendarConfig) -> Self {
        GridOptions {
            max_items_per_day: config.max_items_per_day,
        }
    }
}

/// A rendered month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// Weekday of the first column.
    pub week_start: Weekday,
    /// True while the month's events are still being fetched.
    pub loading: bool,
    /// Number of rows in the grid.
    pub weeks: usize,
    /// Cells in row-major order; always `weeks * 7` long.
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Iterates the day cells in date order.
    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Empty => None,
        })
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    /// Padding outside the month.
    Empty,
    /// A day of the month.
    Day(DayCell),
}

/// A day of the month with its visible entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// The date shown.
    pub date: NaiveDate,
    /// Day of the month.
    pub day: u32,
    /// Entries listed in the cell, work items first.
    pub entries: Vec<CellEntry>,
    /// Entries that did not fit.
    pub overflow: usize,
}

/// A single line in a day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellEntry {
    /// A work item due that day.
    Task {
        /// Work item id.
        id: Uuid,
        /// Work item title.
        title: String,
        /// Work item status.
        status: TaskStatus,
    },
    /// An employee on leave that day.
    Leave {
        /// Leave span id.
        id: Uuid,
        /// The employee on leave.
        employee_id: Uuid,
        /// Kind of leave.
        leave_type: LeaveType,
    },
}

fn day_cell(summary: DaySummary<'_>, day: u32, options: &GridOptions) -> DayCell {
    let total = summary.len();
    let entries: Vec<CellEntry> = summary
        .work_items
        .iter()
        .map(|item| CellEntry::Task {
            id: item.id,
            title: item.title.clone(),
            status: item.status,
        })
        .chain(summary.leave_spans.iter().map(|span| CellEntry::Leave {
            id: span.id,
            employee_id: span.employee_id,
            leave_type: span.leave_type,
        }))
        .take(options.max_items_per_day)
        .collect();

    DayCell {
        date: summary.date,
        day,
        overflow: total - entries.len(),
        entries,
    }
}

/// Renders the calendar state as a grid.
///
/// Pure: the same state and options always give the same grid.
///
/// # Example
///
/// ```
/// use bizdash::calendar::{CalendarState, GridOptions, YearMonth, render};
/// use chrono::Weekday;
///
/// let state = CalendarState::new(YearMonth::new(2024, 3).unwrap(), Weekday::Sun);
/// let grid = render(&state, &GridOptions::default());
///
/// // 5 blank cells, 31 days, 6 blank cells.
/// assert_eq!(grid.weeks, 6);
/// assert_eq!(grid.cells.len(), 42);
/// ```
pub fn render(state: &CalendarState, options: &GridOptions) -> MonthGrid {
    let range = state.range();
    let offset = range.offset as usize;
    let days = range.days_in_month() as usize;
    let weeks = (offset + days).div_ceil(7);

    let mut cells = Vec::with_capacity(weeks * 7);
    cells.extend(std::iter::repeat_n(GridCell::Empty, offset));
    for (index, date) in range.days().enumerate() {
        let summary = bucketize(state.events(), date);
        cells.push(GridCell::Day(day_cell(summary, index as u32 + 1, options)));
    }
    cells.resize(weeks * 7, GridCell::Empty);

    MonthGrid {
        year: range.month.year(),
        month: range.month.month(),
        week_start: state.week_start(),
        loading: state.is_loading(),
        weeks,
        cells,
    }
}
