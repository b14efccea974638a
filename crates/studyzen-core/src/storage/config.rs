//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Pomodoro schedule durations
//! - Notification preferences
//! - Theme selection
//!
//! Configuration is stored at `~/.config/studyzen/config.toml`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::data_dir;

/// Pomodoro schedule configuration, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
    /// Automatically start the next phase when one completes.
    #[serde(default)]
    pub auto_start_breaks: bool,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme identifier (e.g. "default", "lofi", "dark").
    #[serde(default = "default_theme")]
    pub theme: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyzen/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_before_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}
fn default_theme() -> String {
    "default".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_before_long_break: default_sessions_before_long_break(),
            auto_start_breaks: false,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            notifications: NotificationsConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Ok(dir) = data_dir() else {
            return Self::default();
        };
        let path = dir.join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save the configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = data_dir()
            .map_err(|e| ConfigError::SaveFailed {
                path: "<data dir>".into(),
                message: e.to_string(),
            })?
            .join("config.toml");
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, text).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Read a single value by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "schedule.focus_minutes" => Some(self.schedule.focus_minutes.to_string()),
            "schedule.short_break_minutes" => Some(self.schedule.short_break_minutes.to_string()),
            "schedule.long_break_minutes" => Some(self.schedule.long_break_minutes.to_string()),
            "schedule.sessions_before_long_break" => {
                Some(self.schedule.sessions_before_long_break.to_string())
            }
            "schedule.auto_start_breaks" => Some(self.schedule.auto_start_breaks.to_string()),
            "notifications.enabled" => Some(self.notifications.enabled.to_string()),
            "ui.theme" => Some(self.ui.theme.clone()),
            _ => None,
        }
    }

    /// Update a single value by dotted key. Does not persist; call
    /// [`Config::save`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}'"),
            })
        }

        match key {
            "schedule.focus_minutes" => self.schedule.focus_minutes = parse(key, value)?,
            "schedule.short_break_minutes" => {
                self.schedule.short_break_minutes = parse(key, value)?
            }
            "schedule.long_break_minutes" => self.schedule.long_break_minutes = parse(key, value)?,
            "schedule.sessions_before_long_break" => {
                self.schedule.sessions_before_long_break = parse(key, value)?
            }
            "schedule.auto_start_breaks" => self.schedule.auto_start_breaks = parse(key, value)?,
            "notifications.enabled" => self.notifications.enabled = parse(key, value)?,
            "ui.theme" => self.ui.theme = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.schedule.focus_minutes, 25);
        assert_eq!(config.schedule.short_break_minutes, 5);
        assert_eq!(config.schedule.long_break_minutes, 15);
        assert_eq!(config.schedule.sessions_before_long_break, 4);
        assert!(!config.schedule.auto_start_breaks);
        assert!(config.notifications.enabled);
        assert_eq!(config.ui.theme, "default");
    }

    #[test]
    fn get_and_set() {
        let mut config = Config::default();
        config.set("schedule.focus_minutes", "45").unwrap();
        assert_eq!(
            config.get("schedule.focus_minutes").as_deref(),
            Some("45")
        );
        config.set("ui.theme", "lofi").unwrap();
        assert_eq!(config.get("ui.theme").as_deref(), Some("lofi"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut config = Config::default();
        let err = config.set("schedule.bogus", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_rejects_unparsable_value() {
        let mut config = Config::default();
        let err = config.set("schedule.focus_minutes", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.schedule.focus_minutes = 50;
        config.ui.theme = "forest".to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.schedule.focus_minutes, 50);
        assert_eq!(back.ui.theme, "forest");
    }
}
