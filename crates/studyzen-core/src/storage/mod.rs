mod config;
pub mod store;

pub use config::{Config, NotificationsConfig, ScheduleConfig, UiConfig};
pub use store::{keys, Store};

use std::path::PathBuf;

/// Returns `~/.config/studyzen[-dev]/` based on STUDYZEN_ENV.
///
/// Set STUDYZEN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYZEN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyzen-dev")
    } else {
        base_dir.join("studyzen")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
