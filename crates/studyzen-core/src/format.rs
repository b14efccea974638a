//! Display helpers for durations and timestamps.

use chrono::{DateTime, Utc};

/// Render seconds as a compact human duration: "2h 5m", "5m 10s", "45s".
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Render a timestamp relative to `now`: "Just now", "5 minutes ago",
/// "3 hours ago", "2 days ago", then a plain date beyond a week.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    let hours = (now - then).num_hours();
    let days = (now - then).num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minutes ago")
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else if days < 7 {
        format!("{days} days ago")
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}
