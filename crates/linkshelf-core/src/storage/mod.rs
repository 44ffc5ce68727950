//! Storage layer
//!
//! The link collection lives in a single string-keyed slot. Backends decide
//! where that slot is kept.
//!
//! ## Backends
//!
//! - **FileStorage**: one JSON file per key in the data directory
//! - **MemoryStorage**: a `HashMap`, used in tests
//!
//! Every write replaces the whole value; there are no partial updates.

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;

pub use backend::KeyValueStorage;
pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;
