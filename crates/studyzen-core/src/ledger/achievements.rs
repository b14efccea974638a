//! Achievement definitions and unlock records.
//!
//! Achievements are one-time unlockable flags evaluated against a user's
//! current stats. The definition order below is the order in which new
//! unlocks are reported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::UserStats;

/// A static achievement definition.
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Unlock predicate over the user's current stats.
    pub unlocked_by: fn(&UserStats) -> bool,
}

fn first_hour(stats: &UserStats) -> bool {
    stats.total_study_time / 60 >= 60
}

fn week_streak(stats: &UserStats) -> bool {
    stats.current_streak >= 7
}

fn subject_explorer(stats: &UserStats) -> bool {
    stats.subjects.len() >= 3
}

/// All achievements, in declaration (and reporting) order.
pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_hour",
        title: "First Hour",
        description: "Complete 1 hour of total study time",
        icon: "⏰",
        unlocked_by: first_hour,
    },
    AchievementDef {
        id: "week_streak",
        title: "Weekly Warrior",
        description: "Maintain a 7-day study streak",
        icon: "🔥",
        unlocked_by: week_streak,
    },
    AchievementDef {
        id: "subject_explorer",
        title: "Subject Explorer",
        description: "Study 3 different subjects",
        icon: "📚",
        unlocked_by: subject_explorer,
    },
];

/// A newly unlocked achievement, as reported to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub(crate) fn from_def(def: &AchievementDef, unlocked_at: DateTime<Utc>) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            unlocked_at,
        }
    }
}

/// An entry in the global append-only unlock log, kept separately from the
/// per-user unlocked-id set and deduped on (id, username).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub id: String,
    pub username: String,
    pub unlocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::SubjectTime;

    #[test]
    fn first_hour_needs_sixty_minutes() {
        let mut stats = UserStats {
            total_study_time: 3599,
            ..Default::default()
        };
        assert!(!first_hour(&stats));
        stats.total_study_time = 3600;
        assert!(first_hour(&stats));
    }

    #[test]
    fn week_streak_needs_seven_days() {
        let mut stats = UserStats {
            current_streak: 6,
            ..Default::default()
        };
        assert!(!week_streak(&stats));
        stats.current_streak = 7;
        assert!(week_streak(&stats));
    }

    #[test]
    fn subject_explorer_needs_three_subjects() {
        let mut stats = UserStats::default();
        for subject in ["Math", "History"] {
            stats.subjects.push(SubjectTime {
                subject: subject.to_string(),
                seconds: 1,
            });
        }
        assert!(!subject_explorer(&stats));
        stats.subjects.push(SubjectTime {
            subject: "Physics".to_string(),
            seconds: 1,
        });
        assert!(subject_explorer(&stats));
    }

    #[test]
    fn definition_order_is_stable() {
        let ids: Vec<&str> = ACHIEVEMENTS.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["first_hour", "week_streak", "subject_explorer"]);
    }
}
