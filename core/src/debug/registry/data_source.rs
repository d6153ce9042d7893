//! Read-only data sources: named views over producer-owned buffers

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Weak};

use bytemuck::Pod;

use super::super::cell::{BufferSource, DebugBuffer, PropertyAddress};
use super::PropertyKey;

/// A registered data source
pub struct RegisteredDataSource {
    /// Full name, including any group prefix
    pub key: PropertyKey,
    /// Element count recorded at registration
    pub count: usize,
    handle: Weak<dyn BufferSource>,
    /// Set once a stale lookup has been logged
    pub(super) stale_reported: AtomicBool,
}

impl RegisteredDataSource {
    pub fn name(&self) -> &str {
        self.key.as_str()
    }

    pub fn is_live(&self) -> bool {
        self.handle.strong_count() > 0
    }
}

impl std::fmt::Debug for RegisteredDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredDataSource")
            .field("key", &self.key)
            .field("count", &self.count)
            .field("live", &self.is_live())
            .finish()
    }
}

/// Result of a data source query
///
/// The empty source (`is_null()`, zero count) stands for "not registered".
/// Holding a `DataSource` keeps the buffer alive until it is dropped.
#[derive(Clone, Default)]
pub struct DataSource {
    buffer: Option<Arc<dyn BufferSource>>,
    count: usize,
}

impl DataSource {
    /// Number of elements (not bytes)
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_null(&self) -> bool {
        self.buffer.is_none()
    }

    pub fn address(&self) -> Option<PropertyAddress> {
        self.buffer
            .as_ref()
            .map(|buffer| PropertyAddress::of(Arc::as_ptr(buffer)))
    }

    /// Size of one element in bytes, 0 for the empty source
    pub fn element_size(&self) -> usize {
        self.buffer.as_ref().map_or(0, |buffer| buffer.element_size())
    }

    /// Copy of the first `count` elements as raw bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let Some(buffer) = &self.buffer else {
            return Vec::new();
        };
        let len = self.count * buffer.element_size();
        let mut out = Vec::with_capacity(len);
        buffer.with_bytes(&mut |bytes: &[u8]| {
            out.extend_from_slice(&bytes[..len.min(bytes.len())])
        });
        out
    }

    /// Reinterpret the contents as `T`
    ///
    /// `None` for the empty source or when `T` has a different size than the
    /// producer's element type.
    pub fn read_as<T: Pod>(&self) -> Option<Vec<T>> {
        let size = std::mem::size_of::<T>();
        if self.is_null() || size != self.element_size() || size == 0 {
            return None;
        }
        Some(
            self.to_bytes()
                .chunks_exact(size)
                .map(bytemuck::pod_read_unaligned::<T>)
                .collect(),
        )
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSource")
            .field("address", &self.address())
            .field("count", &self.count)
            .finish()
    }
}

impl super::DebugRegistry {
    /// Register a read-only data source
    ///
    /// Does nothing if `name` is already registered as a data source.
    /// Property names are a separate namespace.
    pub fn register_data_source<T: Pod + Send + Sync>(
        &mut self,
        name: impl Into<PropertyKey>,
        buffer: &DebugBuffer<T>,
    ) {
        self.register_data_source_with_count(name, buffer, buffer.len());
    }

    /// Register only the first `count` elements of `buffer`
    ///
    /// `count` is capped at the buffer length.
    pub fn register_data_source_with_count<T: Pod + Send + Sync>(
        &mut self,
        name: impl Into<PropertyKey>,
        buffer: &DebugBuffer<T>,
        count: usize,
    ) {
        let name = name.into();
        if self.finalized {
            tracing::warn!("debug data source '{}' registered after init - ignored", name);
            return;
        }

        let key = self.scoped_key(name);
        if self.data_source_index.contains_key(key.as_str()) {
            tracing::debug!("debug: data source '{}' already registered, keeping first", key);
            return;
        }

        self.data_source_index.insert(key.clone(), self.data_sources.len());
        self.data_sources.push(RegisteredDataSource {
            key,
            count: count.min(buffer.len()),
            handle: buffer.downgrade(),
            stale_reported: AtomicBool::new(false),
        });
    }

    /// Look up a data source; the empty source if absent or stale
    pub fn data_source(&self, name: &str) -> DataSource {
        let Some(&idx) = self.data_source_index.get(name) else {
            return DataSource::default();
        };
        let entry = &self.data_sources[idx];
        match entry.handle.upgrade() {
            Some(buffer) => DataSource {
                buffer: Some(buffer),
                count: entry.count,
            },
            None => {
                self.report_stale("data source", name, &entry.stale_reported);
                DataSource::default()
            }
        }
    }

    pub fn has_data_source(&self, name: &str) -> bool {
        !self.data_source(name).is_null()
    }

    /// All registered data sources in registration order
    pub fn data_sources(&self) -> &[RegisteredDataSource] {
        &self.data_sources
    }
}
