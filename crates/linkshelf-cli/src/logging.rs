//! Logging setup
//!
//! Logs go to stderr, or to `log_file` when one is configured and can be
//! opened. `RUST_LOG` overrides the configured level.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use linkshelf_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    // Ignore error if already initialized
    match config.log_file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }

    debug!("Logging initialized at level {}", config.log_level);
}

/// Open the log file for appending, warning on stderr when it can't be
fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file {:?}: {}. Logging to stderr.",
                path, e
            );
            None
        }
    }
}

fn default_directives(level: &str) -> String {
    format!("linkshelf_core={},linkshelf={}", level, level)
}
