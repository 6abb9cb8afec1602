use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use caseload_application::AppContext;
use caseload_core::util::calendar::CalendarView;
use caseload_infrastructure::{CaseloadPaths, ConfigService, ServiceType};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "caseload")]
#[command(about = "Caseload CLI - students, sessions and calendar for school therapists", long_about = None)]
struct Cli {
    /// Base directory for config, data and logs (defaults to the platform dirs)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session for later commands.
    /// The password is read from CASELOAD_PASSWORD or prompted for.
    Login { email: String },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// List the students on your caseload
    Students,
    /// Show one student and their sessions
    Student { id: String },
    /// List sessions, optionally between two dates
    Sessions {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Open a session and print its roster
    Roster { session_id: String },
    /// Enrol a student in one or more sessions
    Enrol {
        student_id: String,
        #[arg(required = true)]
        session_ids: Vec<String>,
    },
    /// Sessions in a day, week or month window
    Calendar {
        #[arg(long, default_value_t = CalendarView::WorkWeek)]
        view: CalendarView,
        /// Anchor date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Windows to move forward (negative moves back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Avatar style picked for a student id
    Avatar { id: String },
    /// Map a grade between display and stored form, or list grades
    Grade { value: Option<String> },
    /// Check the backend
    Health,
    /// Recently viewed students
    Recent {
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Offline helpers need neither config nor backend.
    match &cli.command {
        Commands::Avatar { id } => {
            commands::avatar::run(id);
            return Ok(());
        }
        Commands::Grade { value } => return commands::grade::run(value.as_deref()),
        _ => {}
    }

    let paths = CaseloadPaths::new(cli.home);
    let config = ConfigService::new(&paths)?.get_config()?;
    let _log_guard = logging::init(&config.logging.level, &paths.get_path(ServiceType::Logs)?)?;

    let ctx = AppContext::bootstrap(&config, &paths)?;
    if let Err(e) = ctx.auth.restore().await {
        tracing::warn!("[Startup] Failed to restore session: {}", e);
    }

    match cli.command {
        Commands::Login { email } => commands::auth::login(&ctx, email).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::Students => commands::students::list(&ctx).await?,
        Commands::Student { id } => commands::students::show(&ctx, &id).await?,
        Commands::Sessions { from, to, limit } => {
            commands::sessions::list(&ctx, from, to, limit).await?
        }
        Commands::Roster { session_id } => commands::sessions::roster(&ctx, &session_id).await?,
        Commands::Enrol {
            student_id,
            session_ids,
        } => commands::sessions::enrol(&ctx, student_id, session_ids).await?,
        Commands::Calendar { view, date, offset } => {
            commands::calendar::run(&ctx, view, date, offset).await?
        }
        Commands::Health => commands::health::run(&ctx).await?,
        Commands::Recent { clear } => commands::recent::run(&ctx, clear).await?,
        Commands::Avatar { .. } | Commands::Grade { .. } => {}
    }

    Ok(())
}
