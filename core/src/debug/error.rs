//! Error types for the debug registry

use std::path::PathBuf;

use super::types::ValueType;

/// Why a property write was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// The registry was built with `allow_mutation = false`
    #[error("debug property writes are disabled")]
    MutationDisabled,

    /// No property registered under this name
    #[error("no debug property named '{0}'")]
    NotFound(String),

    /// The producer dropped the storage behind this property
    #[error("debug property '{0}' refers to storage that no longer exists")]
    Stale(String),

    /// Registered as a watch
    #[error("debug property '{0}' is read-only")]
    ReadOnly(String),

    /// Value type does not match the registered type
    #[error("debug property '{name}' is {expected}, not {found}")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        found: ValueType,
    },
}

/// Failure loading a registry configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid debug config: {0}")]
    Parse(#[from] toml::de::Error),
}
