//! Core configuration traits for Sharuco
//!
//! Configuration is layered: defaults, then a file, then `SHARUCO_*`
//! environment variables. Each layer goes through [`SharucoConfig::validate`]
//! before use.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::SharucoError;

/// Prefix of environment variables read by [`SharucoConfig::merge_with_env`].
pub const ENV_PREFIX: &str = "SHARUCO_";

/// Core trait for Sharuco configuration types
pub trait SharucoConfig: Clone + Default + Send + Sync + 'static {
    /// Load configuration from a `.toml` or `.json` file
    fn load_from_file(path: &Path) -> Result<Self, SharucoError>
    where
        Self: DeserializeOwned,
    {
        read_config_file(path)
    }

    /// Merge `SHARUCO_*` variables from the process environment
    fn merge_with_env(&mut self) -> Result<(), SharucoError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge `SHARUCO_*` variables from an explicit list.
    ///
    /// Variables without the prefix are ignored. The remainder of the name is
    /// lowercased and handed to [`SharucoConfig::set_from_string`].
    fn merge_with_vars(
        &mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), SharucoError> {
        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(ENV_PREFIX) {
                self.set_from_string(&key.to_lowercase(), &value)?;
            }
        }
        Ok(())
    }

    /// Merge with another configuration; fields of `other` that differ from
    /// the defaults win.
    fn merge_with(&mut self, other: &Self);

    /// Validate the configuration
    fn validate(&self) -> Result<(), SharucoError>;

    /// Set a configuration value from a string.
    ///
    /// Unknown keys are ignored so unrelated `SHARUCO_*` variables do not
    /// break loading.
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), SharucoError>;
}

/// Read and decode a configuration file, choosing the format by extension.
pub fn read_config_file<T: DeserializeOwned>(path: &Path) -> Result<T, SharucoError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SharucoError::config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .map_err(|e| SharucoError::config(format!("Invalid TOML: {e}"))),
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| SharucoError::config(format!("Invalid JSON: {e}"))),
        _ => Err(SharucoError::config(format!(
            "Unsupported config format: {}",
            path.display()
        ))),
    }
}
