//! Registry configuration
//!
//! The only policy knob with observable effect is `allow_mutation`, which
//! gates every property write. It defaults to the build profile: on in debug
//! builds, off in release builds. Settings can also come from the `[debug]`
//! table of a TOML file:
//!
//! ```toml
//! [debug]
//! allow_mutation = true
//! warn_on_stale = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Debug registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Whether tools may write properties (default: true in debug builds)
    #[serde(default = "default_allow_mutation")]
    pub allow_mutation: bool,
    /// Log a warning when a query hits a dropped producer (default: true)
    #[serde(default = "default_true")]
    pub warn_on_stale: bool,
}

/// File layout: settings live under a `[debug]` table.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    debug: RegistryConfig,
}

fn default_allow_mutation() -> bool {
    cfg!(debug_assertions)
}
fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allow_mutation: default_allow_mutation(),
            warn_on_stale: default_true(),
        }
    }
}

impl RegistryConfig {
    /// Writable registry regardless of build profile
    pub fn mutable() -> Self {
        Self {
            allow_mutation: true,
            ..Self::default()
        }
    }

    /// Read-only registry regardless of build profile
    pub fn read_only() -> Self {
        Self {
            allow_mutation: false,
            ..Self::default()
        }
    }

    /// Parse the `[debug]` table of a TOML document.
    ///
    /// Missing keys (or a missing table) fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.debug)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("debug config: {e}, using defaults");
                Self::default()
            }
        }
    }
}
