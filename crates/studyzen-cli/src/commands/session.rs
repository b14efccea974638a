use clap::Subcommand;
use studyzen_core::format::{format_duration, relative_time};
use studyzen_core::{Ledger, Notifications, SessionKind, Store};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a study session
    Start {
        username: String,
        /// Subject label for the session
        #[arg(long, default_value = "General")]
        subject: String,
        /// "pomodoro" or "stopwatch"
        #[arg(long, default_value = "stopwatch")]
        kind: SessionKind,
    },
    /// Complete a session by id
    End { id: String },
    /// List recent completed sessions, newest first
    Recent {
        username: String,
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let ledger = Ledger::new(&store);

    match action {
        SessionAction::Start {
            username,
            subject,
            kind,
        } => {
            let session = ledger.start_session(&username, kind, &subject)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::End { id } => {
            let Some(session) = ledger.end_session(&id)? else {
                eprintln!("unknown session id: {id}");
                std::process::exit(1);
            };
            println!(
                "completed {} on {} ({})",
                session.id,
                session.subject,
                format_duration(session.duration_secs)
            );
            announce_unlocks(&store, &ledger, &session.username)?;
        }
        SessionAction::Recent { username, limit } => {
            let now = chrono::Utc::now();
            for session in ledger.recent_sessions(&username, limit)? {
                let when = session
                    .ended_at
                    .map(|t| relative_time(t, now))
                    .unwrap_or_default();
                println!(
                    "{}  {}  {}",
                    when,
                    session.subject,
                    format_duration(session.duration_secs)
                );
            }
        }
    }
    Ok(())
}

/// Run the achievement check after a completed session, printing and
/// recording a notification per new unlock.
pub fn announce_unlocks(
    store: &Store,
    ledger: &Ledger,
    username: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let unlocked = ledger.check_achievements(username)?;
    if unlocked.is_empty() {
        return Ok(());
    }
    let notifications = Notifications::new(store);
    for achievement in unlocked {
        println!(
            "{} unlocked: {} -- {}",
            achievement.icon, achievement.title, achievement.description
        );
        notifications.create(
            username,
            "achievement",
            &achievement.title,
            &achievement.description,
        )?;
    }
    Ok(())
}
