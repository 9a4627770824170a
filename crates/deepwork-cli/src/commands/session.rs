//! Session lifecycle commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use deepwork_core::session::{Session, SessionDetail, SessionSummary};
use deepwork_core::storage::{Config, Database};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Create a new session
    Create {
        /// Session title
        title: String,
        /// What you want to get done
        #[arg(long)]
        goal: Option<String>,
        /// Scheduled duration in minutes (default from config)
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Start a scheduled session
    Start {
        /// Session ID
        id: String,
    },
    /// Pause an active session, recording an interruption
    Pause {
        /// Session ID
        id: String,
        /// Why the session is being interrupted
        #[arg(long)]
        reason: String,
    },
    /// Resume a paused session
    Resume {
        /// Session ID
        id: String,
    },
    /// Complete a session and derive its final status
    Complete {
        /// Session ID
        id: String,
    },
    /// Show full session details
    Show {
        /// Session ID
        id: String,
    },
    /// List sessions, newest first
    History {
        /// Maximum number of sessions to show (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionAction::Create {
            title,
            goal,
            duration,
        } => {
            let duration =
                duration.unwrap_or_else(|| Config::load_or_default().default_duration_min);
            let now = Utc::now();
            let session = Session::create(&title, goal.as_deref(), duration, now)?;
            db.insert_session(&session)?;
            println!("Session created: {}", session.id);
            let detail = SessionDetail::project(&session, now);
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        SessionAction::Start { id } => {
            let mut session = db.require_session(&id)?;
            let event = session.start(Utc::now())?;
            db.update_session(&session)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Pause { id, reason } => {
            let mut session = db.require_session(&id)?;
            let event = session.pause(&reason, Utc::now())?;
            db.update_session(&session)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Resume { id } => {
            let mut session = db.require_session(&id)?;
            let event = session.resume(Utc::now())?;
            db.update_session(&session)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Complete { id } => {
            let mut session = db.require_session(&id)?;
            let event = session.complete(Utc::now())?;
            db.update_session(&session)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Show { id } => {
            let session = db.require_session(&id)?;
            let detail = SessionDetail::project(&session, Utc::now());
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        SessionAction::History { limit } => {
            let limit = limit.unwrap_or_else(|| Config::load_or_default().history_limit);
            let now = Utc::now();
            let items: Vec<SessionSummary> = db
                .list_sessions()?
                .iter()
                .take(limit)
                .map(|session| SessionSummary::project(session, now))
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}
