//! Profile view configuration

use serde::{Deserialize, Serialize};
use sharuco_core::{SharucoConfig, SharucoError};
use std::time::Duration;

/// Default window for the first snapshot of each subscription.
pub const DEFAULT_FIRST_SNAPSHOT_TIMEOUT_MS: u64 = 15_000;

/// Largest accepted first-snapshot window (10 minutes).
pub const MAX_FIRST_SNAPSHOT_TIMEOUT_MS: u64 = 600_000;

/// Default `EnvFilter` directive for hosts.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for a [`crate::ProfileView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileViewConfig {
    /// Window within which each subscription must deliver its first value.
    /// `0` disables the limit.
    pub first_snapshot_timeout_ms: u64,
    /// Default log filter directive used by hosts
    pub log_filter: String,
}

impl Default for ProfileViewConfig {
    fn default() -> Self {
        Self {
            first_snapshot_timeout_ms: DEFAULT_FIRST_SNAPSHOT_TIMEOUT_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ProfileViewConfig {
    /// Configuration without a first-snapshot limit.
    pub fn unbounded() -> Self {
        Self {
            first_snapshot_timeout_ms: 0,
            ..Self::default()
        }
    }

    /// The first-snapshot window, or `None` when disabled.
    pub fn first_snapshot_timeout(&self) -> Option<Duration> {
        (self.first_snapshot_timeout_ms > 0)
            .then(|| Duration::from_millis(self.first_snapshot_timeout_ms))
    }
}

impl SharucoConfig for ProfileViewConfig {
    fn merge_with(&mut self, other: &Self) {
        let defaults = Self::default();
        if other.first_snapshot_timeout_ms != defaults.first_snapshot_timeout_ms {
            self.first_snapshot_timeout_ms = other.first_snapshot_timeout_ms;
        }
        if other.log_filter != defaults.log_filter {
            self.log_filter.clone_from(&other.log_filter);
        }
    }

    fn validate(&self) -> Result<(), SharucoError> {
        if self.log_filter.trim().is_empty() {
            return Err(SharucoError::config("log_filter must not be empty"));
        }
        if self.first_snapshot_timeout_ms > MAX_FIRST_SNAPSHOT_TIMEOUT_MS {
            return Err(SharucoError::config(format!(
                "first_snapshot_timeout_ms must be at most {MAX_FIRST_SNAPSHOT_TIMEOUT_MS}, got {}",
                self.first_snapshot_timeout_ms
            )));
        }
        Ok(())
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), SharucoError> {
        match key {
            "first_snapshot_timeout_ms" => {
                self.first_snapshot_timeout_ms = value.trim().parse().map_err(|_| {
                    SharucoError::config(format!(
                        "Invalid first_snapshot_timeout_ms value: {value}"
                    ))
                })?;
            }
            "log_filter" => self.log_filter = value.to_string(),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ProfileViewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.first_snapshot_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_disables_timeout() {
        assert_eq!(ProfileViewConfig::unbounded().first_snapshot_timeout(), None);
    }

    #[test]
    fn environment_overrides_apply() {
        let mut config = ProfileViewConfig::default();
        config
            .merge_with_vars([
                ("SHARUCO_FIRST_SNAPSHOT_TIMEOUT_MS".to_string(), "250".to_string()),
                ("SHARUCO_LOG_FILTER".to_string(), "sharuco_app=debug".to_string()),
                ("HOME".to_string(), "/root".to_string()),
            ])
            .unwrap();

        assert_eq!(config.first_snapshot_timeout_ms, 250);
        assert_eq!(config.log_filter, "sharuco_app=debug");
    }

    #[test]
    fn malformed_override_is_rejected() {
        let mut config = ProfileViewConfig::default();
        let err = config
            .set_from_string("first_snapshot_timeout_ms", "soon")
            .unwrap_err();
        assert!(matches!(err, SharucoError::Config { .. }));
    }

    #[test]
    fn validation_bounds() {
        let blank = ProfileViewConfig {
            log_filter: " ".to_string(),
            ..ProfileViewConfig::default()
        };
        assert!(blank.validate().is_err());

        let too_long = ProfileViewConfig {
            first_snapshot_timeout_ms: MAX_FIRST_SNAPSHOT_TIMEOUT_MS + 1,
            ..ProfileViewConfig::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn merge_keeps_non_default_fields() {
        let mut base = ProfileViewConfig::default();
        base.merge_with(&ProfileViewConfig::unbounded());
        assert_eq!(base.first_snapshot_timeout_ms, 0);
        assert_eq!(base.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn loads_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"first_snapshot_timeout_ms = 500\n").unwrap();

        let config = ProfileViewConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.first_snapshot_timeout_ms, 500);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
