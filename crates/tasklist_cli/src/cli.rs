//! Command-line options and their mapping onto `AppConfig`.

use clap::Parser;
use std::path::PathBuf;
use tasklist_core::config::default_log_dir;
use tasklist_core::{default_log_level, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(about = "Interactive task list with local persistence")]
#[command(version)]
pub struct Cli {
    /// SQLite database file holding the task slot
    #[arg(long, env = "TASKLIST_DB", default_value = tasklist_core::config::DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,

    /// Keep tasks in memory only for this session
    #[arg(long)]
    pub memory: bool,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "TASKLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            db_path: (!self.memory).then_some(self.db),
            log_level: self
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: self.log_dir.unwrap_or_else(default_log_dir),
            ..AppConfig::default()
        }
    }
}
