//! Calendar view state feeding the sessions read.

use chrono::NaiveDate;

use caseload_core::session::{SessionListParams, TherapySession};
use caseload_core::util::calendar::{
    CalendarEvent, CalendarView, DateWindow, calendar_window, session_events, shift_anchor,
};

use crate::query::{Query, QueryResult};
use crate::resources::SessionQueries;

/// A view and anchor date with the window they cover.
///
/// The window is recomputed only when the view or the anchor actually
/// changes, so equal inputs keep producing the same sessions key.
#[derive(Clone)]
pub struct CalendarQuery {
    sessions: SessionQueries,
    view: CalendarView,
    anchor: NaiveDate,
    window: DateWindow,
}

impl CalendarQuery {
    pub fn new(sessions: SessionQueries, view: CalendarView, anchor: NaiveDate) -> Self {
        Self {
            sessions,
            view,
            anchor,
            window: calendar_window(view, anchor),
        }
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Returns whether the window changed.
    pub fn set_view(&mut self, view: CalendarView) -> bool {
        if view == self.view {
            return false;
        }
        self.view = view;
        self.recompute()
    }

    /// Returns whether the window changed.
    pub fn set_anchor(&mut self, anchor: NaiveDate) -> bool {
        if anchor == self.anchor {
            return false;
        }
        self.anchor = anchor;
        self.recompute()
    }

    pub fn next(&mut self) -> bool {
        self.set_anchor(shift_anchor(self.view, self.anchor, 1))
    }

    pub fn previous(&mut self) -> bool {
        self.set_anchor(shift_anchor(self.view, self.anchor, -1))
    }

    pub fn today(&mut self, today: NaiveDate) -> bool {
        self.set_anchor(today)
    }

    /// Sessions read for the current window.
    pub fn query(&self) -> Query<Vec<TherapySession>> {
        self.sessions
            .list(SessionListParams::window(self.window.start, self.window.end))
    }

    /// Fetches the window's sessions and maps them to calendar events.
    pub async fn events(&self) -> QueryResult<Vec<CalendarEvent>> {
        let result = self.query().fetch().await;
        QueryResult {
            data: session_events(&result.data),
            is_loading: result.is_loading,
            is_stale: result.is_stale,
            error: result.error,
        }
    }

    fn recompute(&mut self) -> bool {
        let window = calendar_window(self.view, self.anchor);
        let changed = window != self.window;
        self.window = window;
        changed
    }
}
