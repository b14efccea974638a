use clap::Subcommand;
use serde::{Deserialize, Serialize};
use studyzen_core::{
    Config, Ledger, Phase, PomodoroTimer, SessionKind, Store, TimerEvent,
};

use super::session::announce_unlocks;

const TIMER_KEY: &str = "pomodoro_timer";
const TIMER_SESSION_KEY: &str = "pomodoro_timer_session";

/// The ledger session backing the currently running focus phase.
#[derive(Serialize, Deserialize)]
struct OpenSession {
    username: String,
    session_id: String,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the pomodoro timer
    Start {
        username: String,
        #[arg(long, default_value = "General")]
        subject: String,
    },
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    Resume,
    /// Skip to the next phase, crediting a focus phase ended early
    Skip,
    /// Reset to an idle focus phase, discarding any open session
    Reset,
    /// Print current timer state as JSON
    Status,
}

fn load_timer(store: &Store) -> PomodoroTimer {
    if let Ok(Some(json)) = store.kv_get(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<PomodoroTimer>(&json) {
            return timer;
        }
    }
    PomodoroTimer::new(Config::load().schedule)
}

fn save_timer(store: &Store, timer: &PomodoroTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    store.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

fn open_session(store: &Store) -> Option<OpenSession> {
    let json = store.kv_get(TIMER_SESSION_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

/// Close out the focus phase's ledger session: complete it, count the
/// pomodoro and surface any fresh achievement unlocks.
fn credit_focus(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let Some(open) = open_session(store) else {
        return Ok(());
    };
    store.kv_delete(TIMER_SESSION_KEY)?;

    let ledger = Ledger::new(store);
    if let Some(session) = ledger.end_session(&open.session_id)? {
        ledger.record_pomodoro(&open.username)?;
        println!(
            "focus complete: {} ({}s)",
            session.subject, session.duration_secs
        );
        announce_unlocks(store, &ledger, &open.username)?;
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut timer = load_timer(&store);

    // Catch a phase that ran out between CLI invocations.
    if let Some(TimerEvent::PhaseCompleted {
        phase: Phase::Focus,
        ..
    }) = timer.tick()
    {
        credit_focus(&store)?;
    }

    match action {
        TimerAction::Start { username, subject } => {
            if let Some(event) = timer.start(&subject) {
                if matches!(event, TimerEvent::Started { .. })
                    && timer.phase() == Phase::Focus
                    && open_session(&store).is_none()
                {
                    let ledger = Ledger::new(&store);
                    let session =
                        ledger.start_session(&username, SessionKind::Pomodoro, &subject)?;
                    let open = OpenSession {
                        username,
                        session_id: session.id,
                    };
                    store.kv_set(TIMER_SESSION_KEY, &serde_json::to_string(&open)?)?;
                }
                println!("{}", serde_json::to_string(&event)?);
            } else {
                println!("timer already running");
            }
        }
        TimerAction::Pause => match timer.pause() {
            Some(event) => println!("{}", serde_json::to_string(&event)?),
            None => println!("timer is not running"),
        },
        TimerAction::Resume => match timer.resume() {
            Some(event) => println!("{}", serde_json::to_string(&event)?),
            None => println!("timer is not paused"),
        },
        TimerAction::Skip => {
            // Ending focus early still counts the session.
            if timer.phase() == Phase::Focus {
                credit_focus(&store)?;
            }
            if let Some(event) = timer.skip() {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        TimerAction::Reset => {
            // A session abandoned by reset is never completed and stays
            // out of every aggregate.
            store.kv_delete(TIMER_SESSION_KEY)?;
            if let Some(event) = timer.reset() {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&timer)?);
        }
    }

    save_timer(&store, &timer)?;
    Ok(())
}
