use super::error::StorageResult;

/// Abstract interface for a string-keyed storage slot.
///
/// This trait handles the "how" of persistence (filesystem vs memory),
/// while `LinkStore` handles the "what" (the link collection and its rules).
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when nothing has been stored yet.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic: a reader never observes a partially written value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
