//! Read/write operations for registered properties

use std::sync::Arc;

use super::super::cell::PropertyCell;
use super::super::error::PropertyError;
use super::super::types::{DebugScalar, DebugValue};
use super::RegisteredProperty;

impl super::DebugRegistry {
    /// Resolve `name` to its entry and a live cell
    fn resolve(
        &self,
        name: &str,
    ) -> Result<(&RegisteredProperty, Arc<dyn PropertyCell>), PropertyError> {
        let entry = self
            .property_info(name)
            .ok_or_else(|| PropertyError::NotFound(name.to_string()))?;
        match entry.handle.upgrade() {
            Some(cell) => Ok((entry, cell)),
            None => {
                self.report_stale("property", name, &entry.stale_reported);
                Err(PropertyError::Stale(name.to_string()))
            }
        }
    }

    // =========================================================================
    // Reads (always available)
    // =========================================================================

    /// Read the current value of `name` without knowing its type
    pub fn read_value(&self, name: &str) -> Option<DebugValue> {
        self.resolve(name).ok().map(|(_, cell)| cell.read_value())
    }

    /// Read a typed property
    ///
    /// Returns `None` if the property is missing, stale, or registered with a
    /// different type than `T`.
    pub fn property<T: DebugScalar>(&self, name: &str) -> Option<T> {
        let value = self.read_value(name)?;
        let typed = T::from_value(value);
        if typed.is_none() {
            tracing::warn!(
                "debug: read of '{}' as {} but it is {}",
                name,
                T::VALUE_TYPE,
                value.value_type()
            );
        }
        typed
    }

    /// Copy a typed property into `out`
    ///
    /// On failure `out` is left untouched and false is returned.
    pub fn get_property<T: DebugScalar>(&self, name: &str, out: &mut T) -> bool {
        match self.property::<T>(name) {
            Some(value) => {
                *out = value;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Writes (gated by `allow_mutation`)
    // =========================================================================

    /// Write a typed property
    ///
    /// Always false when the registry does not allow mutation, whether or not
    /// the property exists.
    pub fn set_property<T: DebugScalar>(&self, name: &str, value: T) -> bool {
        self.try_set_property(name, value).is_ok()
    }

    /// Write a typed property, reporting why a write was refused
    pub fn try_set_property<T: DebugScalar>(
        &self,
        name: &str,
        value: T,
    ) -> Result<(), PropertyError> {
        self.try_write_value(name, value.to_value())
    }

    /// Write an untyped value; its type tag must match the registration
    pub fn write_value(&self, name: &str, value: DebugValue) -> bool {
        self.try_write_value(name, value).is_ok()
    }

    /// Write an untyped value, reporting why a write was refused
    ///
    /// Constrained properties are clamped before the write.
    pub fn try_write_value(&self, name: &str, value: DebugValue) -> Result<(), PropertyError> {
        if !self.allows_mutation() {
            return Err(PropertyError::MutationDisabled);
        }

        let (entry, cell) = self.resolve(name)?;
        if entry.read_only {
            return Err(PropertyError::ReadOnly(name.to_string()));
        }
        if value.value_type() != entry.value_type {
            return Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: entry.value_type,
                found: value.value_type(),
            });
        }

        let value = match &entry.constraints {
            Some(c) => value.clamped(c),
            None => value,
        };
        if cell.write_value(value) {
            Ok(())
        } else {
            // Registration type and cell type come from the same `T`
            Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: cell.value_type(),
                found: value.value_type(),
            })
        }
    }
}
