use std::collections::HashMap;

use super::backend::KeyValueStorage;
use super::error::{StorageError, StorageResult};

/// In-memory storage backend for testing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    simulate_write_error: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with `value` already stored under `key`
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.slots.insert(key.to_string(), value.into());
        storage
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Raw access for assertions.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.simulate_write_error {
            return Err(StorageError::Unavailable("simulated write error".to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.simulate_write_error {
            return Err(StorageError::Unavailable("simulated write error".to_string()));
        }
        self.slots.remove(key);
        Ok(())
    }
}
