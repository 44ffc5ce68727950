//! Export and import handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use linkshelf_core::{KeyValueStorage, LinkStore};

use super::store_error;
use crate::output::Output;

/// Write every link to a backup file
pub async fn export<S: KeyValueStorage>(
    store: &LinkStore<S>,
    path: &Path,
    output: &Output,
) -> Result<PathBuf> {
    let snapshot = store
        .export_snapshot()
        .context("Failed to serialize links")?;

    tokio::fs::write(path, snapshot)
        .await
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    info!("Exported {} links to {:?}", store.len(), path);
    output.success(&format!(
        "Exported {} link(s) to {}",
        store.len(),
        path.display()
    ));
    Ok(path.to_path_buf())
}

/// Append the links from a backup file
///
/// The file is read first; the merge happens in one step afterwards, so a
/// bad file leaves the collection untouched.
pub async fn import<S: KeyValueStorage>(
    store: &mut LinkStore<S>,
    path: &Path,
    output: &Output,
) -> Result<usize> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read import file: {:?}", path))?;

    match store.import_merge(&text) {
        Ok(count) => {
            output.success(&format!("Imported {} link(s)", count));
            Ok(count)
        }
        Err(e) => {
            output.failure("Error importing links. Please check the file format.");
            Err(store_error(e, &format!("Failed to import {:?}", path)))
        }
    }
}
