//! Immutable calendar state with request fencing.
//!
//! Every navigation issues a new [`FetchTicket`]. A fetch result is applied
//! only if it carries the state's current ticket, so a slow response for a
//! month the user has already left can never overwrite newer data.

use chrono::Weekday;
use serde::Serialize;

use crate::error::DashboardResult;

use super::bucket::{DaySummary, bucketize_day};
use super::fetch::MonthEvents;
use super::range::{MonthRange, YearMonth};

/// Identifies one round of fetches. Tickets only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// The raw ticket number.
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        FetchTicket(self.0.wrapping_add(1))
    }
}

/// A snapshot of the calendar view.
///
/// Transitions return a new value; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    range: MonthRange,
    week_start: Weekday,
    ticket: FetchTicket,
    events: MonthEvents,
    loading: bool,
}

impl CalendarState {
    /// Creates the initial state for `month`, waiting on its first fetch.
    pub fn new(month: YearMonth, week_start: Weekday) -> Self {
        CalendarState {
            range: month.resolve(week_start),
            week_start,
            ticket: FetchTicket(1),
            events: MonthEvents::default(),
            loading: true,
        }
    }

    /// Moves to `month`, issuing a fresh ticket and clearing events.
    ///
    /// Navigating to the month already shown also issues a new ticket; there
    /// is no cache across navigations.
    pub fn navigate(&self, month: YearMonth) -> Self {
        CalendarState {
            range: month.resolve(self.week_start),
            week_start: self.week_start,
            ticket: self.ticket.next(),
            events: MonthEvents::default(),
            loading: true,
        }
    }

    /// Re-fetches the current month.
    pub fn refresh(&self) -> Self {
        self.navigate(self.range.month)
    }

    /// Applies fetched events if `ticket` is still current.
    ///
    /// Returns `None` for a stale ticket; the caller keeps its existing state.
    pub fn apply(&self, ticket: FetchTicket, events: MonthEvents) -> Option<Self> {
        if ticket != self.ticket {
            return None;
        }
        Some(CalendarState {
            range: self.range,
            week_start: self.week_start,
            ticket: self.ticket,
            events,
            loading: false,
        })
    }

    /// The displayed month.
    pub fn month(&self) -> YearMonth {
        self.range.month
    }

    /// The displayed month's resolved dates.
    pub fn range(&self) -> &MonthRange {
        &self.range
    }

    /// Weekday of the first grid column.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// The ticket a fetch must present to be applied.
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// The events currently shown.
    pub fn events(&self) -> &MonthEvents {
        &self.events
    }

    /// True until the current ticket's fetch has been applied.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The full, untruncated summary for `day` of the displayed month.
    pub fn day(&self, day: u32) -> DashboardResult<DaySummary<'_>> {
        bucketize_day(&self.events, &self.range, day)
    }
}
