use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};

use caseload_application::AppContext;
use caseload_core::util::calendar::CalendarView;
use caseload_core::util::dates::{format_iso_date, format_session_date, format_time_range};

const CALENDAR_COLORS: usize = 8;

pub async fn run(
    ctx: &AppContext,
    view: CalendarView,
    date: Option<NaiveDate>,
    offset: i32,
) -> Result<()> {
    ctx.auth.require()?;
    let mut calendar = ctx.calendar(view, date.unwrap_or_else(|| Local::now().date_naive()));
    for _ in 0..offset.unsigned_abs() {
        if offset > 0 {
            calendar.next();
        } else {
            calendar.previous();
        }
    }

    let window = calendar.window();
    println!(
        "📅 {} {} to {}",
        calendar.view(),
        format_iso_date(window.start.date()),
        format_iso_date(window.end.date())
    );

    let result = calendar.events().await;
    if let Some(message) = result.error {
        bail!("Failed to load sessions: {}", message);
    }

    let mut events = result.data;
    if events.is_empty() {
        println!("Nothing scheduled.");
        return Ok(());
    }
    events.sort_by_key(|e| e.start);

    let mut current_day = None;
    for event in &events {
        let day = event.start.date();
        if current_day != Some(day) {
            println!("{}", format_session_date(day));
            current_day = Some(day);
        }
        println!(
            "  {}  {} [color {}]",
            format_time_range(event.start, event.end),
            event.title,
            event.color_index(CALENDAR_COLORS)
        );
    }
    Ok(())
}
