use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, TimeDelta};

use caseload_application::{AppContext, NavigationAction, Route};
use caseload_core::session::{AddStudentToSessions, SessionListParams};
use caseload_core::util::dates::{format_session_date, format_time_range};

pub async fn list(
    ctx: &AppContext,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: Option<u32>,
) -> Result<()> {
    ctx.auth.require()?;
    let params = SessionListParams {
        startdate: from.map(|d| d.and_time(NaiveTime::MIN)),
        enddate: to.map(|d| d.and_time(NaiveTime::MIN) + TimeDelta::seconds(86_399)),
        limit,
    };

    let mut sessions = ctx.sessions.list(params).try_fetch().await?;
    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    sessions.sort_by_key(|s| s.start);
    for session in &sessions {
        println!(
            "  {:<12} {} {}  {} ({} students)",
            session.id,
            format_session_date(session.start.date()),
            format_time_range(session.start, session.end),
            session.title(),
            session.students.len()
        );
    }
    Ok(())
}

/// Opens a session the way the session page does and prints its roster.
pub async fn roster(ctx: &AppContext, session_id: &str) -> Result<()> {
    ctx.auth.require()?;
    let selection = ctx
        .selection
        .navigate(NavigationAction::Enter(Route::Session {
            session_id: session_id.to_string(),
        }))
        .await;

    if let Some(message) = selection.roster_error() {
        println!("⚠️  Could not load the roster: {}", message);
        return Ok(());
    }
    if selection.roster().is_empty() {
        println!("No students in session {}.", session_id);
        return Ok(());
    }

    for entry in selection.roster() {
        let rating = entry
            .rating
            .map(|r| format!(" rating {}", r))
            .unwrap_or_default();
        println!(
            "  {:<12} {:<28} {}{}",
            entry.student.id,
            entry.student.display_name(),
            entry.attendance,
            rating
        );
    }
    Ok(())
}

pub async fn enrol(ctx: &AppContext, student_id: String, session_ids: Vec<String>) -> Result<()> {
    ctx.auth.require()?;
    let count = session_ids.len();
    ctx.sessions
        .add_student_to_sessions(&AddStudentToSessions {
            student_id: student_id.clone(),
            session_ids,
        })
        .await?;
    println!("✅ Enrolled {} in {} session(s)", student_id, count);
    Ok(())
}
