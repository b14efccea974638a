//! Record types for the session and streak ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of timer produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Timed focus block driven by the pomodoro timer.
    Pomodoro,
    /// Free-form tracking driven by the stopwatch.
    Stopwatch,
}

impl std::str::FromStr for SessionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pomodoro" => Ok(SessionKind::Pomodoro),
            "stopwatch" => Ok(SessionKind::Stopwatch),
            other => Err(format!("unknown session kind '{other}'")),
        }
    }
}

/// A single study session.
///
/// Created in the started state; transitions once to completed and is
/// immutable thereafter. A session that is never ended stays incomplete
/// forever and is excluded from every aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub username: String,
    pub kind: SessionKind,
    pub subject: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub completed: bool,
}

/// Accumulated seconds for one subject.
///
/// Subjects are kept as an ordered list rather than a map so that
/// first-studied order is preserved; [`crate::Ledger::subject_totals`]
/// relies on it for stable tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTime {
    pub subject: String,
    pub seconds: u64,
}

/// Per-user aggregate statistics derived from completed sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    /// Total completed study time in seconds. Monotonically non-decreasing.
    pub total_study_time: u64,
    /// Consecutive calendar days with at least one completed session.
    pub current_streak: u32,
    /// Highest value `current_streak` has ever reached.
    pub longest_streak: u32,
    /// Completed pomodoro focus phases.
    pub pomodoro_sessions: u64,
    /// Per-subject accumulated seconds, in first-studied order.
    #[serde(default)]
    pub subjects: Vec<SubjectTime>,
}

impl UserStats {
    /// Add `seconds` to a subject, creating the entry at zero if new.
    pub fn add_subject_time(&mut self, subject: &str, seconds: u64) {
        match self.subjects.iter_mut().find(|s| s.subject == subject) {
            Some(entry) => entry.seconds += seconds,
            None => self.subjects.push(SubjectTime {
                subject: subject.to_string(),
                seconds,
            }),
        }
    }

    /// Accumulated seconds for one subject (0 if never studied).
    pub fn subject_seconds(&self, subject: &str) -> u64 {
        self.subjects
            .iter()
            .find(|s| s.subject == subject)
            .map(|s| s.seconds)
            .unwrap_or(0)
    }
}

/// User preferences carried alongside the stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: String,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            notifications: true,
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique, immutable key.
    pub username: String,
    pub display_name: String,
    /// Stored verbatim and compared by equality. Hardening the
    /// credential handling is out of scope for this application.
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stats: UserStats,
    /// Date of the most recent completed session.
    #[serde(default)]
    pub last_study_date: Option<DateTime<Utc>>,
    /// Unlocked achievement ids, no duplicates.
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub following: Vec<String>,
}

impl User {
    /// Create a fresh user with zeroed stats.
    pub fn new(
        username: impl Into<String>,
        display_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            password: password.into(),
            created_at: Utc::now(),
            stats: UserStats::default(),
            last_study_date: None,
            achievements: Vec::new(),
            preferences: Preferences::default(),
            followers: Vec::new(),
            following: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_time_accumulates() {
        let mut stats = UserStats::default();
        stats.add_subject_time("Math", 100);
        stats.add_subject_time("History", 50);
        stats.add_subject_time("Math", 20);
        assert_eq!(stats.subject_seconds("Math"), 120);
        assert_eq!(stats.subject_seconds("History"), 50);
        assert_eq!(stats.subject_seconds("Physics"), 0);
        // First-studied order is preserved.
        assert_eq!(stats.subjects[0].subject, "Math");
        assert_eq!(stats.subjects[1].subject, "History");
    }

    #[test]
    fn session_kind_parses() {
        assert_eq!(
            "pomodoro".parse::<SessionKind>().unwrap(),
            SessionKind::Pomodoro
        );
        assert_eq!(
            "stopwatch".parse::<SessionKind>().unwrap(),
            SessionKind::Stopwatch
        );
        assert!("countdown".parse::<SessionKind>().is_err());
    }

    #[test]
    fn new_user_starts_clean() {
        let user = User::new("ada", "Ada L.", "hunter22");
        assert_eq!(user.stats.total_study_time, 0);
        assert_eq!(user.stats.current_streak, 0);
        assert!(user.last_study_date.is_none());
        assert!(user.achievements.is_empty());
    }
}
