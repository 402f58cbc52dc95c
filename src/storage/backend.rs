//! Storage backend trait.
//!
//! This module provides the persistence seam for eduplan data:
//! - `FileBackend` - JSON files under the platform data directory (default)
//! - `MemoryBackend` - In-memory map, used by tests

use crate::Result;

/// Trait for storage backends that persist string values by key.
///
/// The store layer serializes whole record collections to JSON strings;
/// backends only see opaque key/value pairs.
pub trait StoreBackend: Send + Sync {
    /// Read the value for a key, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key, replacing any existing value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Get the storage location description (for display purposes).
    fn location(&self) -> String;

    /// Get the backend type name.
    fn backend_type(&self) -> &'static str;
}
