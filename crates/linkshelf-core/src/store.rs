//! The link store
//!
//! `LinkStore` owns the canonical link collection and keeps it in step with
//! a storage slot:
//! - The collection is loaded once when the store is opened
//! - Every mutation builds the next collection, writes it in full, and only
//!   then replaces the in-memory state
//!
//! If the write fails the in-memory collection is left as it was, so memory
//! and storage always agree.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = LinkStore::open(FileStorage::new(data_dir));
//!
//! store.add("https://rust-lang.org", "Rust", "lang, docs")?;
//! let hits: Vec<_> = store.filter("rust").collect();
//!
//! let backup = store.export_snapshot()?;
//! store.import_merge(&backup)?;
//! ```

use std::slice;

use tracing::{debug, info, warn};

use crate::error::{ImportError, StoreError, StoreResult};
use crate::models::{parse_tags, Link, LinkId};
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized collection
pub const LINKS_KEY: &str = "links";

/// Result of an edit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The record was overwritten and saved
    Updated,
    /// No record has the given id
    NotFound,
    /// URL or title was empty, nothing changed
    Skipped,
}

/// Read the persisted collection
///
/// Never fails: a missing slot, a read error, or malformed JSON all yield an
/// empty collection.
pub fn load<S: KeyValueStorage>(storage: &S) -> Vec<Link> {
    match storage.get(LINKS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Link>>(&raw) {
            Ok(links) => {
                debug!("Loaded {} links", links.len());
                links
            }
            Err(e) => {
                warn!("Stored links are malformed, starting empty: {}", e);
                Vec::new()
            }
        },
        Ok(None) => {
            debug!("No stored links, starting empty");
            Vec::new()
        }
        Err(e) => {
            warn!("Could not read stored links, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Authoritative link collection backed by a storage slot
pub struct LinkStore<S: KeyValueStorage> {
    links: Vec<Link>,
    storage: S,
}

impl<S: KeyValueStorage> LinkStore<S> {
    /// Open the store, loading whatever `storage` holds
    pub fn open(storage: S) -> Self {
        let links = load(&storage);
        Self { links, storage }
    }

    /// All links in insertion order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Get the first link with `id`
    pub fn get(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|l| &l.id == id)
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get mutable access to the storage backend
    ///
    /// Writing the links slot directly bypasses the store; call
    /// [`LinkStore::reload`] afterwards.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Discard the in-memory collection and load it again
    pub fn reload(&mut self) {
        self.links = load(&self.storage);
    }

    // ==================== Mutations ====================

    /// Append a new link
    ///
    /// An empty title falls back to the URL; `raw_tags` is comma-separated.
    pub fn add(&mut self, url: &str, title: &str, raw_tags: &str) -> StoreResult<&[Link]> {
        if url.trim().is_empty() {
            return Err(StoreError::EmptyUrl);
        }

        let link = Link::new(url, title, raw_tags);
        info!("Adding link {} ({})", link.id, link.url);

        let mut next = self.links.clone();
        next.push(link);
        self.commit(next)?;
        Ok(&self.links)
    }

    /// Overwrite the URL, title and tags of a link
    ///
    /// Only applies when both `new_url` and `new_title` are non-empty; there
    /// are no partial edits. A whitespace-only URL counts as empty. Unknown
    /// ids are ignored.
    pub fn edit(
        &mut self,
        id: &LinkId,
        new_url: &str,
        new_title: &str,
        raw_tags: &str,
    ) -> StoreResult<EditOutcome> {
        let Some(pos) = self.links.iter().position(|l| &l.id == id) else {
            debug!("Edit ignored, no link with id {}", id);
            return Ok(EditOutcome::NotFound);
        };

        if new_url.trim().is_empty() || new_title.is_empty() {
            debug!("Edit of {} skipped, URL and title are both required", id);
            return Ok(EditOutcome::Skipped);
        }

        let mut next = self.links.clone();
        let link = &mut next[pos];
        link.url = new_url.to_string();
        link.title = new_title.to_string();
        link.tags = parse_tags(raw_tags);

        info!("Updating link {}", id);
        self.commit(next)?;
        Ok(EditOutcome::Updated)
    }

    /// Remove every link with `id`
    ///
    /// Returns how many were removed; zero means nothing was written.
    pub fn delete(&mut self, id: &LinkId) -> StoreResult<usize> {
        let next: Vec<Link> = self
            .links
            .iter()
            .filter(|l| &l.id != id)
            .cloned()
            .collect();

        let removed = self.links.len() - next.len();
        if removed == 0 {
            debug!("Delete ignored, no link with id {}", id);
            return Ok(0);
        }

        info!("Deleting link {}", id);
        self.commit(next)?;
        Ok(removed)
    }

    /// Append every record from a JSON array
    ///
    /// Nothing is de-duplicated: importing the same backup twice yields two
    /// copies of each record. On error the collection is unchanged.
    pub fn import_merge(&mut self, json_text: &str) -> StoreResult<usize> {
        let imported = parse_import(json_text)?;
        let count = imported.len();

        let mut next = self.links.clone();
        next.extend(imported);
        self.commit(next)?;

        info!("Imported {} links", count);
        Ok(count)
    }

    // ==================== Queries ====================

    /// Links whose title, URL or a tag contains `term`, ignoring case
    ///
    /// The returned iterator is lazy and can be cloned to restart it.
    pub fn filter(&self, term: &str) -> LinkFilter<'_> {
        LinkFilter {
            inner: self.links.iter(),
            needle: term.to_lowercase(),
        }
    }

    /// Serialize the collection as indented JSON for a backup file
    pub fn export_snapshot(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(&self.links).map_err(StoreError::Serialize)
    }

    /// Persist `next` and make it the current collection
    fn commit(&mut self, next: Vec<Link>) -> StoreResult<()> {
        let raw = serde_json::to_string(&next).map_err(StoreError::Serialize)?;
        self.storage.set(LINKS_KEY, &raw)?;
        self.links = next;
        Ok(())
    }
}

/// Parse and check an import payload
fn parse_import(json_text: &str) -> Result<Vec<Link>, ImportError> {
    let mut links: Vec<Link> = serde_json::from_str(json_text)?;

    for (index, link) in links.iter_mut().enumerate() {
        if link.id.is_empty() {
            return Err(ImportError::InvalidRecord { index, field: "id" });
        }
        if link.url.trim().is_empty() {
            return Err(ImportError::InvalidRecord { index, field: "url" });
        }
        link.strip_blank_tags();
    }

    Ok(links)
}

/// Lazy search over a link collection
///
/// Created by [`LinkStore::filter`].
#[derive(Debug, Clone)]
pub struct LinkFilter<'a> {
    inner: slice::Iter<'a, Link>,
    needle: String,
}

impl<'a> Iterator for LinkFilter<'a> {
    type Item = &'a Link;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.inner.find(|link| link.matches(needle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
