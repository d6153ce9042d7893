//! Debug property registry
//!
//! Maps names to producer-owned properties and data sources. Registration
//! is first-wins: a second registration under a name that is already bound
//! is ignored, and entries are never removed for the registry's lifetime.

mod access;
mod data_source;
mod key;
mod tests;
mod tree;

pub use data_source::{DataSource, RegisteredDataSource};
pub use key::PropertyKey;
pub use tree::*;

use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

use hashbrown::HashMap;

use super::cell::{DebugCell, PropertyAddress, PropertyCell};
use super::config::RegistryConfig;
use super::types::{Constraints, DebugScalar, ValueType};

/// A registered debug property
pub struct RegisteredProperty {
    /// Full name, including any group prefix (e.g., "player/attacks/damage")
    pub key: PropertyKey,
    /// Type of the value
    pub value_type: ValueType,
    /// Optional range constraints (for sliders, and clamping writes)
    pub constraints: Option<Constraints>,
    /// Whether this property is read-only (watch mode)
    pub read_only: bool,
    handle: Weak<dyn PropertyCell>,
    /// Set once a stale lookup has been logged
    stale_reported: AtomicBool,
}

impl RegisteredProperty {
    pub fn name(&self) -> &str {
        self.key.as_str()
    }

    /// Whether the producer still holds the backing cell
    pub fn is_live(&self) -> bool {
        self.handle.strong_count() > 0
    }
}

impl std::fmt::Debug for RegisteredProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredProperty")
            .field("key", &self.key)
            .field("value_type", &self.value_type)
            .field("constraints", &self.constraints)
            .field("read_only", &self.read_only)
            .field("live", &self.is_live())
            .finish()
    }
}

/// Registry of debug properties and data sources
#[derive(Default)]
pub struct DebugRegistry {
    config: RegistryConfig,
    /// Registered properties, in registration order
    properties: Vec<RegisteredProperty>,
    property_index: HashMap<PropertyKey, usize>,
    /// Registered data sources, in registration order
    data_sources: Vec<RegisteredDataSource>,
    data_source_index: HashMap<PropertyKey, usize>,
    /// Current group path stack during registration
    group_stack: Vec<String>,
    /// Whether registration has been finalized (after init completes)
    finalized: bool,
}

impl DebugRegistry {
    /// Create a new empty registry
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Whether `set_property` can ever succeed on this registry
    pub fn allows_mutation(&self) -> bool {
        self.config.allow_mutation
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Begin a new group; later registrations are named `group/name`
    pub fn group_begin(&mut self, name: &str) {
        if self.finalized {
            tracing::warn!("debug group_begin called after init - ignored");
            return;
        }
        self.group_stack.push(name.to_string());
    }

    /// End the current group
    pub fn group_end(&mut self) {
        if self.finalized {
            tracing::warn!("debug group_end called after init - ignored");
            return;
        }
        if self.group_stack.pop().is_none() {
            tracing::warn!("debug group_end called without matching begin");
        }
    }

    /// Prefix `name` with the open groups, if any
    fn scoped_key(&self, name: PropertyKey) -> PropertyKey {
        if self.group_stack.is_empty() {
            name
        } else {
            PropertyKey::from(format!("{}/{}", self.group_stack.join("/"), name))
        }
    }

    // =========================================================================
    // Property registration
    // =========================================================================

    /// Register a property for debug inspection
    ///
    /// Does nothing if `name` is already registered.
    pub fn register_property<T: DebugScalar>(
        &mut self,
        name: impl Into<PropertyKey>,
        cell: &DebugCell<T>,
    ) {
        self.register_internal(name.into(), cell.downgrade(), T::VALUE_TYPE, None, false);
    }

    /// Register a property whose writes are clamped to `constraints`
    pub fn register_property_with_constraints<T: DebugScalar>(
        &mut self,
        name: impl Into<PropertyKey>,
        cell: &DebugCell<T>,
        constraints: Constraints,
    ) {
        self.register_internal(
            name.into(),
            cell.downgrade(),
            T::VALUE_TYPE,
            Some(constraints),
            false,
        );
    }

    /// Register a read-only watch property
    pub fn watch_property<T: DebugScalar>(
        &mut self,
        name: impl Into<PropertyKey>,
        cell: &DebugCell<T>,
    ) {
        self.register_internal(name.into(), cell.downgrade(), T::VALUE_TYPE, None, true);
    }

    fn register_internal(
        &mut self,
        name: PropertyKey,
        handle: Weak<dyn PropertyCell>,
        value_type: ValueType,
        constraints: Option<Constraints>,
        read_only: bool,
    ) {
        if self.finalized {
            tracing::warn!("debug registration of '{}' after init - ignored", name);
            return;
        }

        let key = self.scoped_key(name);
        if self.property_index.contains_key(key.as_str()) {
            tracing::debug!("debug: property '{}' already registered, keeping first", key);
            return;
        }

        self.property_index.insert(key.clone(), self.properties.len());
        self.properties.push(RegisteredProperty {
            key,
            value_type,
            constraints,
            read_only,
            handle,
            stale_reported: AtomicBool::new(false),
        });
    }

    // =========================================================================
    // Property lookup
    // =========================================================================

    /// Identity of the cell bound to `name`
    ///
    /// `None` if the name was never registered or the producer dropped the
    /// cell. All reads and writes go through the same lookup.
    pub fn property_address(&self, name: &str) -> Option<PropertyAddress> {
        let entry = self.property_info(name)?;
        if !entry.is_live() {
            self.report_stale("property", name, &entry.stale_reported);
            return None;
        }
        Some(PropertyAddress::of(entry.handle.as_ptr()))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property_address(name).is_some()
    }

    /// Registration metadata for `name`, live or not
    pub fn property_info(&self, name: &str) -> Option<&RegisteredProperty> {
        self.property_index
            .get(name)
            .map(|&idx| &self.properties[idx])
    }

    /// All registered properties in registration order
    pub fn properties(&self) -> &[RegisteredProperty] {
        &self.properties
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(RegisteredProperty::name)
    }

    /// Warn about a dropped producer, once per entry
    fn report_stale(&self, kind: &str, name: &str, reported: &AtomicBool) {
        if self.config.warn_on_stale && !reported.swap(true, Ordering::Relaxed) {
            tracing::warn!("debug: {} '{}' refers to dropped storage", kind, name);
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Finalize registration (called after init completes)
    ///
    /// This auto-closes any unclosed groups and prevents further registration.
    pub fn finalize_registration(&mut self) {
        if !self.group_stack.is_empty() {
            tracing::warn!(
                "debug: {} unclosed groups at end of init, auto-closing",
                self.group_stack.len()
            );
            self.group_stack.clear();
        }

        self.finalized = true;

        if !self.is_empty() {
            tracing::info!(
                "Debug inspection: registered {} properties, {} data sources",
                self.properties.len(),
                self.data_sources.len()
            );
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Get number of registered properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if registry is empty (no properties or data sources)
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.data_sources.is_empty()
    }
}

impl std::fmt::Debug for DebugRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugRegistry")
            .field("config", &self.config)
            .field("properties", &self.properties)
            .field("data_sources", &self.data_sources)
            .field("finalized", &self.finalized)
            .finish()
    }
}
