//! Calendar session driving navigation against a data source.

use std::sync::Arc;

use chrono::Weekday;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::source::DataSource;

use super::fetch::{MonthEvents, fetch_month};
use super::range::YearMonth;
use super::state::{CalendarState, FetchTicket};

/// Loads a month in one shot: a fresh state with its events applied.
///
/// Used where no navigation history exists, such as a single HTTP request.
pub async fn load_month<S>(source: &S, month: YearMonth, week_start: Weekday) -> CalendarState
where
    S: DataSource + ?Sized,
{
    let state = CalendarState::new(month, week_start);
    let events = fetch_month(source, state.range()).await;
    match state.apply(state.ticket(), events) {
        Some(loaded) => loaded,
        None => state,
    }
}

/// Holds the latest calendar state and fetches on navigation.
///
/// Navigation takes the lock only long enough to swap in the new state, so
/// fetches for different months may be in flight at once. Only the response
/// carrying the current ticket is applied.
pub struct CalendarSession<S: ?Sized> {
    source: Arc<S>,
    state: RwLock<CalendarState>,
}

impl<S> CalendarSession<S>
where
    S: DataSource + ?Sized,
{
    /// Creates a session positioned on `month`. Nothing is fetched until the
    /// first navigation or refresh.
    pub fn new(source: Arc<S>, month: YearMonth, week_start: Weekday) -> Self {
        CalendarSession {
            source,
            state: RwLock::new(CalendarState::new(month, week_start)),
        }
    }

    /// Returns a snapshot of the current state.
    pub async fn state(&self) -> CalendarState {
        self.state.read().await.clone()
    }

    /// Shows `month`, fetching its events.
    ///
    /// Returns the state after this call's response was handled. If another
    /// navigation happened meanwhile, that newer state is returned instead.
    pub async fn show(&self, month: YearMonth) -> CalendarState {
        self.transition(|state| state.navigate(month)).await
    }

    /// Shows the month after the current one.
    pub async fn next(&self) -> CalendarState {
        self.transition(|state| state.navigate(state.month().next())).await
    }

    /// Shows the month before the current one.
    pub async fn previous(&self) -> CalendarState {
        self.transition(|state| state.navigate(state.month().previous()))
            .await
    }

    /// Re-fetches the current month.
    pub async fn refresh(&self) -> CalendarState {
        self.transition(CalendarState::refresh).await
    }

    async fn transition(
        &self,
        step: impl FnOnce(&CalendarState) -> CalendarState,
    ) -> CalendarState {
        let (ticket, range) = {
            let mut state = self.state.write().await;
            let next = step(&state);
            let issued = (next.ticket(), *next.range());
            *state = next;
            issued
        };

        let events = fetch_month(self.source.as_ref(), &range).await;
        self.accept(ticket, events).await
    }

    async fn accept(&self, ticket: FetchTicket, events: MonthEvents) -> CalendarState {
        let mut state = self.state.write().await;
        match state.apply(ticket, events) {
            Some(next) => {
                info!(
                    ticket = ticket.value(),
                    year = next.month().year(),
                    month = next.month().month(),
                    work_items = next.events().work_items.len(),
                    leave_spans = next.events().leave_spans.len(),
                    "Calendar month loaded"
                );
                *state = next;
            }
            None => {
                debug!(
                    ticket = ticket.value(),
                    current = state.ticket().value(),
                    "Discarding stale calendar response"
                );
            }
        }
        state.clone()
    }
}
