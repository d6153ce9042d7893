//! Introspect Core - debug introspection registry
//!
//! Engine subsystems expose named, typed scalar properties and read-only
//! data buffers; debug tooling discovers, reads and (in mutable registries)
//! writes them by name at runtime without compile-time knowledge of either
//! side's types.
//!
//! # Architecture
//!
//! - [`DebugRegistry`] - name-keyed index of properties and data sources
//! - [`DebugCell`] / [`DebugBuffer`] - producer-owned storage, held weakly by the registry
//! - [`RegistryConfig`] - mutation policy, defaulting to the build profile

pub mod debug;

// Re-export debug types
pub use debug::{
    DataSource, DebugBuffer, DebugCell, DebugRegistry, DebugValue, PropertyAddress,
    PropertyError, RegistryConfig, ValueType,
};
