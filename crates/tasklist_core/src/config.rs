//! Runtime configuration for a task list session.
//!
//! # Invariants
//! - `log_dir` is absolute.
//! - `db_path = None` selects a volatile in-memory store.

use crate::logging::{default_log_level, normalize_level};
use crate::view::NotificationTimings;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
    ZeroNotificationDuration,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "database path cannot be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => {
                write!(f, "log dir must be absolute, got `{}`", path.display())
            }
            Self::ZeroNotificationDuration => {
                write!(f, "notification visible duration must be positive")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub notifications: NotificationTimings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: Some(PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: default_log_level().to_string(),
            log_dir: default_log_dir(),
            notifications: NotificationTimings::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.db_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyDbPath);
            }
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        if !self.log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(self.log_dir.clone()));
        }
        if self.notifications.visible_for.is_zero() {
            return Err(ConfigError::ZeroNotificationDuration);
        }
        Ok(())
    }
}

/// `<tmp>/tasklist-logs`.
pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("tasklist-logs")
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_relative_log_dir_and_bad_level() {
        let config = AppConfig {
            log_dir: PathBuf::from("logs"),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::RelativeLogDir(_)
        ));

        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidLogLevel(_)
        ));
    }
}
