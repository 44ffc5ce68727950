//! Command handlers

pub mod config;
pub mod link;
pub mod transfer;

use anyhow::{bail, Result};

use linkshelf_core::{KeyValueStorage, LinkId, LinkStore, StoreError};

use crate::output::short_id;

/// Resolve a link ID from a full id or a unique prefix
///
/// When nothing matches, the input is returned as-is so edit and delete can
/// ignore it. Only an ambiguous prefix is an error.
pub fn resolve_id<S: KeyValueStorage>(store: &LinkStore<S>, id: &str) -> Result<LinkId> {
    let exact = LinkId::from(id);
    if store.get(&exact).is_some() {
        return Ok(exact);
    }

    let mut matches: Vec<&LinkId> = store
        .links()
        .iter()
        .map(|l| &l.id)
        .filter(|candidate| candidate.as_str().starts_with(id))
        .collect();
    // Records imported twice share an id; they count as one match
    matches.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    matches.dedup();

    match matches.len() {
        0 => Ok(exact),
        1 => Ok(matches[0].clone()),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for candidate in &matches {
                if let Some(link) = store.get(candidate) {
                    eprintln!("  {} - {}", short_id(link.id.as_str()), link.title);
                }
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Wrap a store error, adding the storage recovery hint when there is one
pub fn store_error(err: StoreError, action: &str) -> anyhow::Error {
    let hint = match &err {
        StoreError::Storage(e) => e.recovery_suggestion(),
        _ => None,
    };
    let message = match hint {
        Some(hint) => format!("{}. {}", action, hint),
        None => action.to_string(),
    };
    anyhow::Error::new(err).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkshelf_core::{MemoryStorage, StorageError};
    use std::io;
    use std::path::PathBuf;

    fn store_with_ids(ids: &[&str]) -> LinkStore<MemoryStorage> {
        let records: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "url": format!("https://{}.test", id),
                    "title": id,
                    "tags": [],
                    "timestamp": "2024-05-01T09:30:00.000Z"
                })
            })
            .collect();
        let mut store = LinkStore::open(MemoryStorage::new());
        store
            .import_merge(&serde_json::Value::Array(records).to_string())
            .unwrap();
        store
    }

    #[test]
    fn test_resolve_exact() {
        let store = store_with_ids(&["abc", "abcdef"]);
        assert_eq!(resolve_id(&store, "abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_resolve_prefix() {
        let store = store_with_ids(&["abc123", "xyz789"]);
        assert_eq!(resolve_id(&store, "xy").unwrap().as_str(), "xyz789");
    }

    #[test]
    fn test_resolve_ambiguous() {
        let store = store_with_ids(&["abc123", "abc456"]);
        assert!(resolve_id(&store, "abc").is_err());
    }

    #[test]
    fn test_resolve_missing_passes_through() {
        let store = store_with_ids(&["abc123"]);
        assert_eq!(resolve_id(&store, "zzz").unwrap().as_str(), "zzz");
    }

    #[test]
    fn test_store_error_includes_recovery_hint() {
        let err = StoreError::Storage(StorageError::PermissionDenied {
            path: PathBuf::from("/data/links.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        let msg = store_error(err, "Failed to add link").to_string();
        assert!(msg.starts_with("Failed to add link. "));
        assert!(msg.contains("permissions"));

        let msg = store_error(StoreError::EmptyUrl, "Failed to add link").to_string();
        assert_eq!(msg, "Failed to add link");
    }

    #[test]
    fn test_resolve_duplicated_id() {
        let store = store_with_ids(&["abc123", "abc123"]);
        assert_eq!(resolve_id(&store, "abc").unwrap().as_str(), "abc123");
    }
}
