//! Errors returned by `LinkStore` operations

use thiserror::Error;

use crate::storage::StorageError;

/// Why an import was rejected
///
/// A rejected import never changes the collection.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input is not a JSON array of link records
    #[error("Import data is not a valid link list: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record is missing its id or URL
    #[error("Imported record {index} has an empty {field}")]
    InvalidRecord { index: usize, field: &'static str },
}

/// Errors that can occur while mutating the link store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A link needs a URL
    #[error("Cannot add a link without a URL")]
    EmptyUrl,

    #[error(transparent)]
    Import(#[from] ImportError),

    /// Writing the collection back to storage failed
    #[error("Failed to save links: {0}")]
    Storage(#[from] StorageError),

    /// The collection could not be serialized
    #[error("Failed to serialize links: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
