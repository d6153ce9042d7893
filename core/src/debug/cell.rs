//! Producer-owned storage for debug properties and data sources
//!
//! Subsystems keep the strong handles ([`DebugCell`], [`DebugBuffer`]) and
//! the registry only ever holds `Weak` references to them. Dropping the
//! producer's handle invalidates the registration without the registry
//! owning or freeing anything.

use std::sync::{Arc, PoisonError, RwLock};

use bytemuck::Pod;

use super::types::{DebugScalar, DebugValue, ValueType};

/// Opaque identity of a registered storage location
///
/// Two addresses compare equal iff they refer to the same cell or buffer.
/// The value is only meaningful while the storage is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyAddress(usize);

impl PropertyAddress {
    pub(crate) fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }
}

/// Type-erased read/write access to a typed cell
pub(crate) trait PropertyCell: Send + Sync {
    fn value_type(&self) -> ValueType;

    fn read_value(&self) -> DebugValue;

    /// Returns false if `value` has a different type tag
    fn write_value(&self, value: DebugValue) -> bool;
}

impl<T: DebugScalar> PropertyCell for RwLock<T> {
    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn read_value(&self) -> DebugValue {
        self.read().unwrap_or_else(PoisonError::into_inner).to_value()
    }

    fn write_value(&self, value: DebugValue) -> bool {
        let Some(v) = T::from_value(value) else {
            return false;
        };
        *self.write().unwrap_or_else(PoisonError::into_inner) = v;
        true
    }
}

/// A scalar value exposed to debug tooling
///
/// Cloning shares the same storage.
pub struct DebugCell<T: DebugScalar> {
    inner: Arc<RwLock<T>>,
}

impl<T: DebugScalar> DebugCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn get(&self) -> T {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, value: T) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Identity of this cell, as reported by `DebugRegistry::property_address`
    pub fn address(&self) -> PropertyAddress {
        PropertyAddress::of(Arc::as_ptr(&self.inner))
    }

    pub(crate) fn downgrade(&self) -> std::sync::Weak<dyn PropertyCell> {
        let erased: Arc<dyn PropertyCell> = self.inner.clone();
        Arc::downgrade(&erased)
    }
}

impl<T: DebugScalar> Clone for DebugCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: DebugScalar + Default> Default for DebugCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: DebugScalar + std::fmt::Debug> std::fmt::Debug for DebugCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DebugCell").field(&self.get()).finish()
    }
}

/// Type-erased byte view over a buffer
pub(crate) trait BufferSource: Send + Sync {
    fn element_size(&self) -> usize;

    fn element_count(&self) -> usize;

    fn with_bytes(&self, f: &mut dyn FnMut(&[u8]));
}

impl<T: Pod + Send + Sync> BufferSource for RwLock<Box<[T]>> {
    fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    fn element_count(&self) -> usize {
        self.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn with_bytes(&self, f: &mut dyn FnMut(&[u8])) {
        let guard = self.read().unwrap_or_else(PoisonError::into_inner);
        f(bytemuck::cast_slice(&guard[..]));
    }
}

/// A fixed-length buffer exposed read-only to debug tooling
///
/// The producer may update elements in place; the length never changes, so
/// the element count recorded at registration stays valid.
pub struct DebugBuffer<T: Pod + Send + Sync> {
    inner: Arc<RwLock<Box<[T]>>>,
}

impl<T: Pod + Send + Sync> DebugBuffer<T> {
    /// Create a zero-filled buffer of `len` elements
    pub fn new(len: usize) -> Self {
        Self::from_vec(vec![T::zeroed(); len])
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data.into_boxed_slice())),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mutate the contents in place
    pub fn update<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec()
    }

    pub fn address(&self) -> PropertyAddress {
        PropertyAddress::of(Arc::as_ptr(&self.inner))
    }

    pub(crate) fn downgrade(&self) -> std::sync::Weak<dyn BufferSource> {
        let erased: Arc<dyn BufferSource> = self.inner.clone();
        Arc::downgrade(&erased)
    }
}

impl<T: Pod + Send + Sync> Clone for DebugBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
