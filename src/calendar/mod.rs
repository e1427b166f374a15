//! Calendar aggregation view.
//!
//! This module resolves a displayed month into dates, fetches the work items
//! and leave spans that overlap it, buckets them per day, and renders the
//! month as a 7-column grid. Navigation is modelled as immutable state with
//! request fencing, so only the latest fetch for the latest month is shown.

mod bucket;
mod fetch;
mod grid;
mod range;
mod session;
mod state;

pub use bucket::{DaySummary, bucketize, bucketize_day};
pub use fetch::{MonthEvents, fetch_month, leave_span_query, work_item_query};
pub use grid::{
    CellEntry, DEFAULT_MAX_ITEMS_PER_DAY, DayCell, GridCell, GridOptions, MonthGrid, render,
};
pub use range::{MonthRange, YearMonth};
pub use session::{CalendarSession, load_month};
pub use state::{CalendarState, FetchTicket};
