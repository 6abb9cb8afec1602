use anyhow::{Result, bail};

use caseload_application::AppContext;
use caseload_core::util::avatar::avatar_variant;
use caseload_core::util::dates::{format_session_date, format_time_range};
use caseload_core::util::grade::grade_to_display;

pub async fn list(ctx: &AppContext) -> Result<()> {
    ctx.auth.require()?;
    let mut students = ctx.students.list().try_fetch().await?;
    if students.is_empty() {
        println!("No students on your caseload yet.");
        return Ok(());
    }

    students.sort_by(|a, b| {
        (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
    });
    println!("{} students:", students.len());
    for student in &students {
        println!(
            "  {:<12} {:<28} grade {:<14} {}",
            student.id,
            student.display_name(),
            grade_to_display(student.grade),
            avatar_variant(&student.id)
        );
    }
    Ok(())
}

/// Shows one student and records the visit.
pub async fn show(ctx: &AppContext, student_id: &str) -> Result<()> {
    ctx.auth.require()?;
    let Some(student) = ctx.students.detail(student_id).try_fetch().await? else {
        bail!("Student {} not found", student_id);
    };

    println!("📋 {}", student.display_name());
    println!("   Grade:  {}", grade_to_display(student.grade));
    println!("   Avatar: {}", avatar_variant(&student.id));
    if let Some(notes) = student.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        println!("   Notes:  {}", notes);
    }

    let sessions = ctx.students.sessions(&student.id).try_fetch().await?;
    if sessions.is_empty() {
        println!("   No sessions scheduled.");
    } else {
        println!("   Sessions:");
        for session in &sessions {
            println!(
                "     {} {}  {}",
                format_session_date(session.start.date()),
                format_time_range(session.start, session.end),
                session.title()
            );
        }
    }

    ctx.recently_viewed.record(student.summary()).await?;
    Ok(())
}
