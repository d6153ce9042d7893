//! Debug inspection system
//!
//! Lets engine subsystems expose named, typed scalar properties and
//! read-only data buffers so debug tooling (an inspector panel, a console)
//! can discover, read and, when allowed, write them by name at runtime.
//!
//! # Overview
//!
//! Producers own their storage as [`DebugCell`]s and [`DebugBuffer`]s and
//! register them once, usually while the subsystem is constructed. The
//! [`DebugRegistry`] keeps only weak handles: it never owns or frees the
//! storage, and lookups of a dropped producer report the name as absent.
//!
//! # Usage
//!
//! ## Producer side
//!
//! ```rust
//! use introspect_core::debug::{DebugCell, DebugRegistry, RegistryConfig};
//!
//! let mut registry = DebugRegistry::new(RegistryConfig::mutable());
//! let gamma = DebugCell::new(1.0f32);
//!
//! registry.group_begin("tonemap");
//! registry.register_property("gamma", &gamma);
//! registry.group_end();
//!
//! // Tool side
//! assert!(registry.set_property("tonemap/gamma", 2.2f32));
//! let mut out = 0.0f32;
//! assert!(registry.get_property("tonemap/gamma", &mut out));
//! assert_eq!(gamma.get(), 2.2);
//! ```
//!
//! # Design Principles
//!
//! - **First registration wins**: duplicate names are ignored, never rebound
//! - **Writes are opt-in**: `set_property` only succeeds when the registry is
//!   built with `allow_mutation`, which defaults to debug builds only
//! - **Typed access is checked**: reading or writing with the wrong type is
//!   refused instead of reinterpreting memory

pub mod cell;
pub mod config;
pub mod error;
pub mod export;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use cell::{DebugBuffer, DebugCell, PropertyAddress};
pub use config::RegistryConfig;
pub use error::{ConfigError, PropertyError};
pub use export::{PropertySnapshot, export_as_json, export_as_rust_flat, snapshot};
pub use registry::{
    DataSource, DebugRegistry, PropertyKey, RegisteredDataSource, RegisteredProperty, TreeNode,
};
pub use types::{Constraints, DebugScalar, DebugValue, ValueType};
