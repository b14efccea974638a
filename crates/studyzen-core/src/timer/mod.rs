//! Wall-clock timer engines.
//!
//! Both engines are state machines without internal threads: the caller
//! ticks them periodically and reacts to the events they emit. They are
//! serializable so a CLI invocation can park one in the store and pick it
//! up again later.

mod pomodoro;
mod stopwatch;

pub use pomodoro::{Phase, PomodoroTimer, TimerEvent};
pub use stopwatch::{Lap, Stopwatch};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
