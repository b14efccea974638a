//! Free-form stopwatch engine.
//!
//! Tracks elapsed wall-clock time with pause support and lap marks. Like
//! the pomodoro engine it carries no thread of its own; elapsed time is
//! derived from epoch timestamps whenever it is queried.

use serde::{Deserialize, Serialize};

use super::{now_ms, TimerState};

/// A recorded lap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    pub number: u32,
    /// Time since the previous lap (or start), in milliseconds.
    pub lap_ms: u64,
    /// Total elapsed time at the moment of the lap.
    pub total_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    #[serde(default)]
    state: TimerState,
    /// Elapsed milliseconds accumulated across completed run segments.
    accumulated_ms: u64,
    /// Epoch ms of the current run segment's start, while running.
    #[serde(default)]
    segment_started_ms: Option<u64>,
    #[serde(default)]
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            accumulated_ms: 0,
            segment_started_ms: None,
            laps: Vec::new(),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Total elapsed milliseconds, including the running segment.
    pub fn elapsed_ms(&self) -> u64 {
        let running = self
            .segment_started_ms
            .map(|start| now_ms().saturating_sub(start))
            .unwrap_or(0);
        self.accumulated_ms + running
    }

    /// Start, or resume after a pause. No-op while running.
    pub fn start(&mut self) {
        if self.state == TimerState::Running {
            return;
        }
        self.state = TimerState::Running;
        self.segment_started_ms = Some(now_ms());
    }

    /// Pause, folding the running segment into the accumulated total.
    pub fn pause(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        if let Some(start) = self.segment_started_ms.take() {
            self.accumulated_ms += now_ms().saturating_sub(start);
        }
        self.state = TimerState::Paused;
    }

    /// Record a lap at the current elapsed time. Only valid while running.
    pub fn lap(&mut self) -> Option<Lap> {
        if self.state != TimerState::Running {
            return None;
        }
        let total_ms = self.elapsed_ms();
        let previous_total = self.laps.last().map(|l| l.total_ms).unwrap_or(0);
        let lap = Lap {
            number: self.laps.len() as u32 + 1,
            lap_ms: total_ms.saturating_sub(previous_total),
            total_ms,
        };
        self.laps.push(lap.clone());
        Some(lap)
    }

    /// Stop and clear, returning the final elapsed milliseconds.
    pub fn reset(&mut self) -> u64 {
        self.pause();
        let elapsed = self.accumulated_ms;
        self.accumulated_ms = 0;
        self.segment_started_ms = None;
        self.state = TimerState::Idle;
        self.laps.clear();
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_idle_and_zero() {
        let sw = Stopwatch::new();
        assert_eq!(sw.state(), TimerState::Idle);
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn pause_accumulates_segment() {
        let mut sw = Stopwatch::new();
        sw.start();
        // Simulate 90 seconds of runtime.
        sw.segment_started_ms = Some(now_ms() - 90_000);
        sw.pause();
        assert!(sw.elapsed_ms() >= 90_000);
        assert_eq!(sw.state(), TimerState::Paused);

        // Resuming keeps the accumulated time.
        sw.start();
        assert!(sw.elapsed_ms() >= 90_000);
    }

    #[test]
    fn laps_measure_deltas() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.segment_started_ms = Some(now_ms() - 60_000);
        let first = sw.lap().unwrap();
        assert_eq!(first.number, 1);
        assert!(first.lap_ms >= 60_000);

        sw.segment_started_ms = Some(now_ms() - 100_000);
        let second = sw.lap().unwrap();
        assert_eq!(second.number, 2);
        assert!(second.total_ms >= first.total_ms);
        assert_eq!(second.lap_ms, second.total_ms - first.total_ms);
    }

    #[test]
    fn lap_requires_running() {
        let mut sw = Stopwatch::new();
        assert!(sw.lap().is_none());
    }

    #[test]
    fn reset_reports_final_elapsed() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.segment_started_ms = Some(now_ms() - 45_000);
        sw.lap();
        let elapsed = sw.reset();
        assert!(elapsed >= 45_000);
        assert_eq!(sw.elapsed_ms(), 0);
        assert_eq!(sw.state(), TimerState::Idle);
        assert!(sw.laps().is_empty());
    }
}
