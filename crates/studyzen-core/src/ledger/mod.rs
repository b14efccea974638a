//! Session and streak ledger.
//!
//! The ledger owns the record of study sessions and derives per-user
//! aggregate statistics from it: total time, per-subject time, calendar-day
//! streaks and achievement unlocks. It is the single writer for the users,
//! sessions and unlock-log collections.
//!
//! Lookup misses never raise: ending an unknown session returns `None`,
//! stats for an unknown user return `None`, and ending a session whose
//! owner has been deleted still persists the session but skips the stats
//! update. Callers that care about consistency recheck state afterwards.

mod achievements;
mod streak;
mod types;

pub use achievements::{Achievement, AchievementDef, UnlockRecord, ACHIEVEMENTS};
pub use types::{Preferences, Session, SessionKind, SubjectTime, User, UserStats};

use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::{keys, Store};

/// Session and streak accounting over a [`Store`].
pub struct Ledger<'a> {
    store: &'a Store,
}

impl<'a> Ledger<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Look up a user by username.
    pub fn user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self.store.read_collection(keys::USERS)?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    /// Insert or replace a user, keyed by username.
    pub fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users: Vec<User> = self.store.read_collection(keys::USERS)?;
        match users.iter_mut().find(|u| u.username == user.username) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.store.write_collection(keys::USERS, &users)
    }

    /// Current aggregate stats for a user, or `None` if unknown.
    pub fn stats(&self, username: &str) -> Result<Option<UserStats>, StoreError> {
        Ok(self.user(username)?.map(|u| u.stats))
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Create and persist a new session in the started state.
    pub fn start_session(
        &self,
        username: &str,
        kind: SessionKind,
        subject: &str,
    ) -> Result<Session, StoreError> {
        self.start_session_at(username, kind, subject, Utc::now())
    }

    /// Deterministic variant of [`Ledger::start_session`] used by tests
    /// and history imports.
    pub fn start_session_at(
        &self,
        username: &str,
        kind: SessionKind,
        subject: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Session, StoreError> {
        let subject = if subject.trim().is_empty() {
            "General"
        } else {
            subject
        };
        let session = Session {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            kind,
            subject: subject.to_string(),
            started_at,
            ended_at: None,
            duration_secs: 0,
            completed: false,
        };

        let mut sessions: Vec<Session> = self.store.read_collection(keys::SESSIONS)?;
        sessions.push(session.clone());
        self.store.write_collection(keys::SESSIONS, &sessions)?;
        Ok(session)
    }

    /// Complete a session and fold its duration into the owner's stats.
    ///
    /// Returns `None` for an unknown id. Ending an already-completed
    /// session is a no-op that returns the stored session unchanged, so
    /// durations can never double-count.
    pub fn end_session(&self, session_id: &str) -> Result<Option<Session>, StoreError> {
        self.end_session_at(session_id, Utc::now())
    }

    /// Deterministic variant of [`Ledger::end_session`].
    pub fn end_session_at(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, StoreError> {
        let mut sessions: Vec<Session> = self.store.read_collection(keys::SESSIONS)?;
        let Some(index) = sessions.iter().position(|s| s.id == session_id) else {
            return Ok(None);
        };
        if sessions[index].completed {
            return Ok(Some(sessions[index].clone()));
        }

        let duration = (now - sessions[index].started_at).num_seconds().max(0) as u64;
        {
            let session = &mut sessions[index];
            session.ended_at = Some(now);
            session.duration_secs = duration;
            session.completed = true;
        }
        let session = sessions[index].clone();
        self.store.write_collection(keys::SESSIONS, &sessions)?;

        // A session whose owner no longer exists is still persisted; only
        // the stats update is skipped.
        if let Some(mut user) = self.user(&session.username)? {
            user.stats.total_study_time += duration;
            user.stats.add_subject_time(&session.subject, duration);

            let last_study = user
                .last_study_date
                .map(|d| d.with_timezone(&Local).date_naive());
            streak::advance(&mut user.stats, last_study, now.with_timezone(&Local).date_naive());
            user.last_study_date = Some(now);

            self.save_user(&user)?;
        }

        Ok(Some(session))
    }

    /// Count one completed pomodoro focus phase for a user.
    ///
    /// Unknown users are ignored.
    pub fn record_pomodoro(&self, username: &str) -> Result<(), StoreError> {
        if let Some(mut user) = self.user(username)? {
            user.stats.pomodoro_sessions += 1;
            self.save_user(&user)?;
        }
        Ok(())
    }

    /// A user's most recent completed sessions, newest first.
    pub fn recent_sessions(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<Session>, StoreError> {
        let sessions: Vec<Session> = self.store.read_collection(keys::SESSIONS)?;
        let mut completed: Vec<Session> = sessions
            .into_iter()
            .filter(|s| s.username == username && s.completed)
            .collect();
        completed.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));
        completed.truncate(limit);
        Ok(completed)
    }

    // ── Aggregates ───────────────────────────────────────────────────

    /// Seconds studied today (local calendar date), over completed
    /// sessions only.
    pub fn today_study_time(&self, username: &str) -> Result<u64, StoreError> {
        self.study_time_on(username, Local::now().date_naive())
    }

    /// Seconds studied on a specific local calendar date. Date equality,
    /// not a rolling 24-hour window.
    pub fn study_time_on(&self, username: &str, day: NaiveDate) -> Result<u64, StoreError> {
        let sessions: Vec<Session> = self.store.read_collection(keys::SESSIONS)?;
        let total = sessions
            .iter()
            .filter(|s| s.username == username && s.completed)
            .filter(|s| {
                s.ended_at
                    .map(|t| t.with_timezone(&Local).date_naive() == day)
                    .unwrap_or(false)
            })
            .map(|s| s.duration_secs)
            .sum();
        Ok(total)
    }

    /// Per-subject totals sorted descending by seconds. The sort is
    /// stable, so subjects tied on time keep first-studied order.
    pub fn subject_totals(&self, username: &str) -> Result<Vec<SubjectTime>, StoreError> {
        let Some(user) = self.user(username)? else {
            return Ok(Vec::new());
        };
        let mut totals = user.stats.subjects;
        totals.sort_by(|a, b| b.seconds.cmp(&a.seconds));
        Ok(totals)
    }

    // ── Achievements ─────────────────────────────────────────────────

    /// Evaluate all achievement predicates for a user, unlocking any that
    /// now hold. Returns only newly unlocked achievements, in definition
    /// order; repeated calls without new activity return nothing.
    pub fn check_achievements(&self, username: &str) -> Result<Vec<Achievement>, StoreError> {
        self.check_achievements_at(username, Utc::now())
    }

    /// Deterministic variant of [`Ledger::check_achievements`].
    pub fn check_achievements_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Achievement>, StoreError> {
        let Some(mut user) = self.user(username)? else {
            return Ok(Vec::new());
        };

        let mut unlocked = Vec::new();
        for def in ACHIEVEMENTS {
            if user.achievements.iter().any(|id| id == def.id) {
                continue;
            }
            if (def.unlocked_by)(&user.stats) {
                user.achievements.push(def.id.to_string());
                unlocked.push(Achievement::from_def(def, now));
            }
        }

        if !unlocked.is_empty() {
            self.save_user(&user)?;

            let mut log: Vec<UnlockRecord> =
                self.store.read_collection(keys::ACHIEVEMENT_LOG)?;
            for achievement in &unlocked {
                let seen = log
                    .iter()
                    .any(|r| r.id == achievement.id && r.username == username);
                if !seen {
                    log.push(UnlockRecord {
                        id: achievement.id.clone(),
                        username: username.to_string(),
                        unlocked_at: achievement.unlocked_at,
                    });
                }
            }
            self.store.write_collection(keys::ACHIEVEMENT_LOG, &log)?;
        }

        Ok(unlocked)
    }

    /// The global append-only unlock log.
    pub fn unlock_log(&self) -> Result<Vec<UnlockRecord>, StoreError> {
        self.store.read_collection(keys::ACHIEVEMENT_LOG)
    }
}
