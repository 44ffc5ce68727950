//! Link command handlers

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use linkshelf_core::{EditOutcome, KeyValueStorage, LinkStore};

use super::{resolve_id, store_error};
use crate::clipboard::{copy_text, Clipboard};
use crate::output::Output;
use crate::prompt::confirm;

/// Add a new link
pub fn add<S: KeyValueStorage>(
    store: &mut LinkStore<S>,
    url: &str,
    title: &str,
    tags: &str,
    output: &Output,
) -> Result<()> {
    store
        .add(url, title, tags)
        .map_err(|e| store_error(e, "Failed to add link"))?;

    if let Some(link) = store.links().last() {
        output.success(&format!("Added link: {}", link.id));
        output.print_link(link);
    }

    Ok(())
}

/// List all links
pub fn list<S: KeyValueStorage>(store: &LinkStore<S>, output: &Output) -> Result<()> {
    output.print_links(store.links());
    Ok(())
}

/// Search links by title, URL or tag
pub fn search<S: KeyValueStorage>(store: &LinkStore<S>, term: &str, output: &Output) -> Result<()> {
    output.print_links(store.filter(term));
    Ok(())
}

/// Show a single link
pub fn show<S: KeyValueStorage>(store: &LinkStore<S>, id: &str, output: &Output) -> Result<()> {
    let link_id = resolve_id(store, id)?;
    let link = store
        .get(&link_id)
        .ok_or_else(|| anyhow!("Link not found: {}", id))?;

    output.print_link(link);
    Ok(())
}

/// Edit a link
///
/// Fields not given on the command line keep their current value. An id
/// that matches nothing leaves the collection untouched.
pub fn edit<S: KeyValueStorage>(
    store: &mut LinkStore<S>,
    id: &str,
    url: Option<String>,
    title: Option<String>,
    tags: Option<String>,
    output: &Output,
) -> Result<()> {
    let link_id = resolve_id(store, id)?;
    let (url, title, tags) = match store.get(&link_id) {
        Some(current) => (
            url.unwrap_or_else(|| current.url.clone()),
            title.unwrap_or_else(|| current.title.clone()),
            tags.unwrap_or_else(|| current.tags.join(",")),
        ),
        None => (
            url.unwrap_or_default(),
            title.unwrap_or_default(),
            tags.unwrap_or_default(),
        ),
    };

    let outcome = store
        .edit(&link_id, &url, &title, &tags)
        .map_err(|e| store_error(e, "Failed to update link"))?;

    match outcome {
        EditOutcome::Updated => {
            output.success("Link updated");
            if let Some(link) = store.get(&link_id) {
                output.print_link(link);
            }
        }
        EditOutcome::Skipped => {
            output.failure("Link not updated: URL and title must both be non-empty");
        }
        EditOutcome::NotFound => {
            debug!("edit: no link with id {}", link_id);
        }
    }

    Ok(())
}

/// Delete a link
///
/// Deleting an id that matches nothing is a silent no-op.
pub fn delete<S: KeyValueStorage>(
    store: &mut LinkStore<S>,
    id: &str,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let link_id = resolve_id(store, id)?;

    if !yes && output.should_prompt() {
        if let Some(link) = store.get(&link_id) {
            println!("Delete link: {} - {}", link.id, link.title);
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    let removed = store
        .delete(&link_id)
        .map_err(|e| store_error(e, "Failed to delete link"))?;

    if removed > 0 {
        output.success(&format!("Deleted link: {} ({} record(s))", link_id, removed));
    } else {
        debug!("delete: no link with id {}", link_id);
    }
    Ok(())
}

/// Copy a link's URL to the clipboard
///
/// A clipboard failure is logged and reported, but is not an error.
pub async fn copy<S, C>(
    store: &LinkStore<S>,
    id: &str,
    clipboard: C,
    output: &Output,
) -> Result<()>
where
    S: KeyValueStorage,
    C: Clipboard + Send + 'static,
{
    let link_id = resolve_id(store, id)?;
    let url = store
        .get(&link_id)
        .map(|l| l.url.clone())
        .ok_or_else(|| anyhow!("Link not found: {}", id))?;

    match copy_text(clipboard, url).await {
        Ok(()) => output.success("Link copied to clipboard!"),
        Err(e) => {
            warn!("Failed to copy: {}", e);
            output.failure("Link not copied to clipboard");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::tests::{DeniedClipboard, RecordingClipboard};
    use crate::output::OutputFormat;
    use linkshelf_core::MemoryStorage;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn store() -> LinkStore<MemoryStorage> {
        LinkStore::open(MemoryStorage::new())
    }

    #[test]
    fn test_add_command() {
        let mut store = store();
        add(&mut store, "https://x.test", "", "a, b, a", &quiet()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.links()[0].title, "https://x.test");
        assert_eq!(store.links()[0].tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_add_command_empty_url_fails() {
        let mut store = store();
        assert!(add(&mut store, "", "title", "", &quiet()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let mut store = store();
        store.add("https://old.test", "Old", "keep, me").unwrap();
        let id = store.links()[0].id.to_string();

        edit(
            &mut store,
            &id[..6],
            None,
            Some("New".to_string()),
            None,
            &quiet(),
        )
        .unwrap();

        let link = &store.links()[0];
        assert_eq!(link.url, "https://old.test");
        assert_eq!(link.title, "New");
        assert_eq!(link.tags, vec!["keep", "me"]);
    }

    #[test]
    fn test_edit_with_empty_title_is_skipped() {
        let mut store = store();
        store.add("https://old.test", "Old", "").unwrap();
        let id = store.links()[0].id.to_string();

        edit(&mut store, &id, None, Some(String::new()), None, &quiet()).unwrap();
        assert_eq!(store.links()[0].title, "Old");
    }

    #[test]
    fn test_delete_with_yes() {
        let mut store = store();
        store.add("https://a.test", "", "").unwrap();
        let id = store.links()[0].id.to_string();

        delete(&mut store, &id, true, &quiet()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_id_edit_and_delete_are_noops() {
        let mut store = store();
        store.add("https://keep.test", "Keep", "x").unwrap();
        let before = store.export_snapshot().unwrap();

        edit(
            &mut store,
            "deadbeef",
            Some("https://other.test".to_string()),
            Some("Other".to_string()),
            None,
            &quiet(),
        )
        .unwrap();
        delete(&mut store, "deadbeef", true, &quiet()).unwrap();

        assert_eq!(store.export_snapshot().unwrap(), before);
    }

    #[test]
    fn test_unknown_id_show_is_error() {
        let store = store();
        assert!(show(&store, "missing", &quiet()).is_err());
    }

    #[test]
    fn test_add_storage_failure_leaves_store_empty() {
        let mut store = store();
        store.storage_mut().set_simulate_write_error(true);

        let err = add(&mut store, "https://x.test", "", "", &quiet()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to add link"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_copy_uses_url() {
        let mut store = store();
        store.add("https://copy.test", "Copy", "").unwrap();
        let id = store.links()[0].id.to_string();
        let clipboard = RecordingClipboard::default();

        copy(&store, &id, clipboard.clone(), &quiet()).await.unwrap();
        assert_eq!(*clipboard.0.lock().unwrap(), vec!["https://copy.test"]);
    }

    #[tokio::test]
    async fn test_copy_failure_is_not_fatal() {
        let mut store = store();
        store.add("https://copy.test", "", "").unwrap();
        let id = store.links()[0].id.to_string();

        assert!(copy(&store, &id, DeniedClipboard, &quiet()).await.is_ok());
    }
}
