// SPDX-License-Identifier: MIT
//
// File logging for the editor binary.
//
// The terminal is busy showing the editor, so log lines go to a plain
// file in the user's state directory. The filter comes from `MINI_LOG`,
// then `RUST_LOG`, then the configured level.

use std::path::PathBuf;

use thiserror::Error;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

const LOG_FILE: &str = "mini.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("create log directory {} failed", path.display())]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("initialize tracing subscriber failed")]
    InitSubscriber {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub fn init_logging(default_level: &str) -> Result<PathBuf, LoggingError> {
    let log_dir = user_log_dir();
    std::fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateLogDir {
        path: log_dir.clone(),
        source,
    })?;

    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(env_filter(default_level))
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|source| LoggingError::InitSubscriber { source })?;

    Ok(log_dir.join(LOG_FILE))
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env("MINI_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn user_log_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join("mini")
            .join("logs")
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join("Library")
            .join("Logs")
            .join("mini")
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Some(state_home) = std::env::var_os("XDG_STATE_HOME").map(PathBuf::from) {
            return state_home.join("mini").join("logs");
        }
        std::env::var_os("HOME")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join(".local")
            .join("state")
            .join("mini")
            .join("logs")
    }
}
