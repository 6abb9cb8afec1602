//! Calendar windows and session events.
//!
//! Windows are inclusive, in local (naive) time: a window starts at 00:00:00
//! of its first day and ends at 23:59:59 of its last day.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::avatar::string_hash;
use crate::session::TherapySession;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CalendarView {
    Day,
    #[default]
    WorkWeek,
    Month,
}

/// Inclusive `[start, end]` pair fed to the sessions read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + TimeDelta::seconds(86_399)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Window covering `view` around `anchor`.
///
/// - `Day`: the anchor day
/// - `WorkWeek`: the ISO week (Monday to Sunday) containing the anchor
/// - `Month`: the calendar month containing the anchor
pub fn calendar_window(view: CalendarView, anchor: NaiveDate) -> DateWindow {
    let (first, last) = match view {
        CalendarView::Day => (anchor, anchor),
        CalendarView::WorkWeek => {
            let monday = anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
            (monday, monday + Days::new(6))
        }
        CalendarView::Month => (first_of_month(anchor), last_of_month(anchor)),
    };
    DateWindow {
        start: start_of_day(first),
        end: end_of_day(last),
    }
}

/// Moves the anchor by `steps` units of the view (negative moves back).
pub fn shift_anchor(view: CalendarView, anchor: NaiveDate, steps: i32) -> NaiveDate {
    let magnitude = steps.unsigned_abs();
    let moved = match view {
        CalendarView::Day | CalendarView::WorkWeek => {
            let unit = if view == CalendarView::Day { 1 } else { 7 };
            let days = Days::new(u64::from(magnitude) * unit);
            if steps >= 0 {
                anchor.checked_add_days(days)
            } else {
                anchor.checked_sub_days(days)
            }
        }
        CalendarView::Month => {
            let months = Months::new(magnitude);
            if steps >= 0 {
                anchor.checked_add_months(months)
            } else {
                anchor.checked_sub_months(months)
            }
        }
    };
    moved.unwrap_or(anchor)
}

/// A session projected onto the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    /// Series id used only to pick a stable color; never compared for identity.
    pub parent_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub resource: TherapySession,
}

impl CalendarEvent {
    pub fn from_session(session: &TherapySession) -> Self {
        Self {
            id: session.id.clone(),
            parent_id: session
                .parent_session_id
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| session.id.clone()),
            title: session.title(),
            start: session.start,
            end: session.end,
            resource: session.clone(),
        }
    }

    /// Index into a color palette; every event of one series shares a color.
    pub fn color_index(&self, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        (string_hash(&self.parent_id).unsigned_abs() as usize) % palette_len
    }
}

pub fn session_events(sessions: &[TherapySession]) -> Vec<CalendarEvent> {
    sessions.iter().map(CalendarEvent::from_session).collect()
}
