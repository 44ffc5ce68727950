//! linkshelf Core Library
//!
//! This crate provides the core functionality for linkshelf, a personal
//! bookmark list: links with titles and tags, kept in a single local
//! storage slot.
//!
//! # Architecture
//!
//! - **LinkStore**: owns the collection, writes it back after every change
//! - **KeyValueStorage**: where the serialized collection lives
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = LinkStore::open(FileStorage::from_config(&config));
//!
//! // Add a link
//! store.add("https://example.com", "Example", "web, docs")?;
//!
//! // Search
//! let hits: Vec<&Link> = store.filter("docs").collect();
//! ```
//!
//! # Modules
//!
//! - `store`: The link store (main entry point)
//! - `models`: Link records and tag parsing
//! - `storage`: Storage backends
//! - `config`: Application configuration
//! - `error`: Store and import errors

pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{ImportError, StoreError, StoreResult};
pub use models::{parse_tags, Link, LinkId};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{EditOutcome, LinkFilter, LinkStore, LINKS_KEY};
