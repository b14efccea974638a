//! # StudyZen Core Library
//!
//! This library provides the core business logic for StudyZen, a study
//! tracking application. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Ledger**: The authoritative record of study sessions and the
//!   per-user statistics derived from it (total time, streaks, per-subject
//!   time, achievement unlocks)
//! - **Storage**: SQLite-backed key-value store holding each collection as
//!   a JSON blob, plus TOML-based configuration
//! - **Timers**: Wall-clock-based pomodoro and stopwatch engines that
//!   require the caller to periodically invoke `tick()`
//! - **Accounts**: User registration, login and search
//!
//! ## Key Components
//!
//! - [`Ledger`]: Session and streak accounting
//! - [`Store`]: Collection persistence
//! - [`Config`]: Application configuration management
//! - [`PomodoroTimer`] / [`Stopwatch`]: Timer state machines

pub mod accounts;
pub mod community;
pub mod error;
pub mod format;
pub mod ledger;
pub mod notifications;
pub mod storage;
pub mod timer;

pub use accounts::{Accounts, UserSummary};
pub use community::{Community, ForumPost, PostFilter};
pub use error::{AccountError, ConfigError, CoreError, StoreError};
pub use ledger::{
    Achievement, AchievementDef, Ledger, Session, SessionKind, SubjectTime, UnlockRecord, User,
    UserStats, ACHIEVEMENTS,
};
pub use notifications::{Notification, Notifications};
pub use storage::{Config, Store};
pub use timer::{Lap, Phase, PomodoroTimer, Stopwatch, TimerEvent, TimerState};
