//! Pure derived-state helpers used by presentation code.

pub mod avatar;
pub mod calendar;
pub mod dates;
pub mod grade;

pub use avatar::{AVATAR_VARIANTS, avatar_variant};
pub use calendar::{CalendarEvent, CalendarView, DateWindow, calendar_window, session_events};
pub use grade::{grade_to_display, grade_to_storage};
