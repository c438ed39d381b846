//! User configuration, loaded from TOML.
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration:
//!
//! ```toml
//! tab_stop = 8
//! quit_times = 0
//! message_timeout_secs = 5
//! log_level = "info"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {} failed", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse config {} failed", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Columns per tab stop in the render form.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    pub quit_times: u32,
    /// Seconds a status message stays on the message bar.
    pub message_timeout_secs: u64,
    /// Fallback log filter when no env filter is set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: 8,
            quit_times: 0,
            message_timeout_secs: 5,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file exists but can't be read,
    /// [`ConfigError::Parse`] if it isn't valid config TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse from a TOML string. `tab_stop` is clamped to at least 1.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed input or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        config.tab_stop = config.tab_stop.max(1);
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/mini/config.toml`, falling back to `~/.config`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("mini").join("config.toml"))
    }

    #[must_use]
    pub const fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.tab_stop, 8);
        assert_eq!(c.quit_times, 0);
        assert_eq!(c.message_timeout(), Duration::from_secs(5));
        assert_eq!(c.log_level, "info");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let c = Config::from_toml("tab_stop = 4\nquit_times = 3\n").unwrap();
        assert_eq!(c.tab_stop, 4);
        assert_eq!(c.quit_times, 3);
        assert_eq!(c.message_timeout_secs, 5);
    }

    #[test]
    fn zero_tab_stop_is_clamped() {
        assert_eq!(Config::from_toml("tab_stop = 0").unwrap().tab_stop, 1);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Config::from_toml("tabstop = 4").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("mini-config-test-does-not-exist.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn load_reports_parse_error_with_path() {
        let dir = std::env::temp_dir().join(format!("mini-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "tab_stop = \"wide\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
