//! Pomodoro timer engine.
//!
//! A wall-clock-based state machine cycling through focus and break
//! phases. It does not create sessions itself -- the caller starts a
//! ledger session alongside `start()` and ends it when a focus phase
//! completes.
//!
//! ## Phase cycle
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> LongBreak (every Nth focus)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::ScheduleConfig;

use super::{now_ms, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

/// Emitted by the engine on state changes; the caller reacts to these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    Started {
        phase: Phase,
        subject: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran to completion; the engine has already advanced.
    PhaseCompleted {
        phase: Phase,
        next_phase: Phase,
        at: DateTime<Utc>,
    },
    /// The user skipped ahead; the skipped focus phase still counts.
    Skipped {
        from_phase: Phase,
        to_phase: Phase,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
}

/// Core pomodoro engine.
///
/// Operates on wall-clock deltas -- no internal thread. The caller is
/// responsible for calling `tick()` periodically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    settings: ScheduleConfig,
    phase: Phase,
    state: TimerState,
    /// Remaining time in milliseconds for the current phase.
    remaining_ms: u64,
    /// Focus phases completed since the last reset; drives long-break
    /// placement.
    focus_count: u32,
    subject: String,
    /// Timestamp (ms since epoch) when the timer was last resumed.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl PomodoroTimer {
    pub fn new(settings: ScheduleConfig) -> Self {
        let remaining_ms = u64::from(settings.focus_minutes) * 60_000;
        Self {
            settings,
            phase: Phase::Focus,
            state: TimerState::Idle,
            remaining_ms,
            focus_count: 0,
            subject: "General".to_string(),
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn focus_count(&self) -> u32 {
        self.focus_count
    }

    pub fn total_ms(&self) -> u64 {
        self.phase_duration_ms(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    fn phase_duration_ms(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Focus => self.settings.focus_minutes,
            Phase::ShortBreak => self.settings.short_break_minutes,
            Phase::LongBreak => self.settings.long_break_minutes,
        };
        u64::from(minutes) * 60_000
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the current phase, or resume it when paused.
    pub fn start(&mut self, subject: &str) -> Option<TimerEvent> {
        match self.state {
            TimerState::Idle => {
                if !subject.trim().is_empty() {
                    self.subject = subject.trim().to_string();
                }
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(TimerEvent::Started {
                    phase: self.phase,
                    subject: self.subject.clone(),
                    duration_secs: self.remaining_ms / 1000,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => self.resume(),
            TimerState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => {
                // Flush elapsed time first.
                self.flush_elapsed();
                self.state = TimerState::Paused;
                self.last_tick_epoch_ms = None;
                Some(TimerEvent::Paused {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(TimerEvent::Resumed {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Skip to the next phase. A skipped focus phase still counts toward
    /// long-break placement, matching a user ending focus early.
    pub fn skip(&mut self) -> Option<TimerEvent> {
        let from = self.phase;
        let to = self.advance_phase();
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        Some(TimerEvent::Skipped {
            from_phase: from,
            to_phase: to,
            at: Utc::now(),
        })
    }

    /// Back to an idle focus phase. Does not touch the focus count.
    pub fn reset(&mut self) -> Option<TimerEvent> {
        self.phase = Phase::Focus;
        self.state = TimerState::Idle;
        self.remaining_ms = self.phase_duration_ms(Phase::Focus);
        self.last_tick_epoch_ms = None;
        Some(TimerEvent::Reset { at: Utc::now() })
    }

    /// Call periodically. Returns `Some(TimerEvent::PhaseCompleted)` when
    /// the running phase finishes.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed();
        if self.remaining_ms > 0 {
            return None;
        }

        let finished = self.phase;
        let next = self.advance_phase();
        if self.settings.auto_start_breaks {
            self.state = TimerState::Running;
            self.last_tick_epoch_ms = Some(now_ms());
        } else {
            self.state = TimerState::Idle;
            self.last_tick_epoch_ms = None;
        }
        Some(TimerEvent::PhaseCompleted {
            phase: finished,
            next_phase: next,
            at: Utc::now(),
        })
    }

    /// Move to the next phase and reload its duration.
    fn advance_phase(&mut self) -> Phase {
        let next = match self.phase {
            Phase::Focus => {
                self.focus_count += 1;
                if self.focus_count % self.settings.sessions_before_long_break.max(1) == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };
        self.phase = next;
        self.remaining_ms = self.phase_duration_ms(next);
        next
    }

    /// Subtract wall-clock time elapsed since the last tick.
    fn flush_elapsed(&mut self) {
        let now = now_ms();
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
        }
        self.last_tick_epoch_ms = Some(now);
    }
}
