//! Clipboard access
//!
//! Copies text through the platform's clipboard tool:
//! - macOS: pbcopy
//! - Linux: xclip, falling back to xsel
//! - Windows: clip.exe
//!
//! Copying runs on the blocking thread pool so the caller can await it.

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
use std::io::Write;
#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
use std::process::{Child, Command, ExitStatus, Stdio};

use thiserror::Error;

/// Clipboard failures
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard tool could be started
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The tool started but did not accept the text
    #[error("{tool} failed: {details}")]
    Tool { tool: &'static str, details: String },

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    #[error("Clipboard not supported on this platform")]
    Unsupported,

    /// The background copy task did not complete
    #[error("Clipboard task failed: {0}")]
    Task(String),
}

/// Something that can receive text
pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(target_os = "macos")]
        {
            pipe_to("pbcopy", &[], text)
        }

        #[cfg(target_os = "linux")]
        {
            match pipe_to("xclip", &["-selection", "clipboard"], text) {
                Err(ClipboardError::Spawn { .. }) => {
                    pipe_to("xsel", &["--clipboard", "--input"], text)
                }
                other => other,
            }
        }

        #[cfg(target_os = "windows")]
        {
            pipe_to("clip", &[], text)
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            let _ = text;
            Err(ClipboardError::Unsupported)
        }
    }
}

/// Copy `text` without blocking the async runtime
pub async fn copy_text<C>(clipboard: C, text: String) -> Result<(), ClipboardError>
where
    C: Clipboard + Send + 'static,
{
    tokio::task::spawn_blocking(move || clipboard.set_text(&text))
        .await
        .map_err(|e| ClipboardError::Task(e.to_string()))?
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_to(tool: &'static str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|source| ClipboardError::Spawn { tool, source })?;

    let status = feed(&mut child, tool, text)?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Tool {
            tool,
            details: format!("exited with {}", status),
        })
    }
}

/// Write `text` to the child's stdin and wait for it to exit
///
/// If the write fails the child is killed and reaped before returning.
#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn feed(child: &mut Child, tool: &'static str, text: &str) -> Result<ExitStatus, ClipboardError> {
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(ClipboardError::Tool {
                tool,
                details: e.to_string(),
            });
        }
    }

    child.wait().map_err(|e| ClipboardError::Tool {
        tool,
        details: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Clipboard that records what it was given
    #[derive(Clone, Default)]
    pub(crate) struct RecordingClipboard(pub Arc<Mutex<Vec<String>>>);

    impl Clipboard for RecordingClipboard {
        fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Clipboard that always refuses
    pub(crate) struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Tool {
                tool: "test",
                details: "permission denied".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_copy_text() {
        let clipboard = RecordingClipboard::default();
        copy_text(clipboard.clone(), "https://example.com".to_string())
            .await
            .unwrap();
        assert_eq!(*clipboard.0.lock().unwrap(), vec!["https://example.com"]);
    }

    #[tokio::test]
    async fn test_copy_text_error() {
        let err = copy_text(DeniedClipboard, "x".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_reaps_child() {
        // Closes stdin, then lingers
        let mut child = Command::new("sh")
            .args(["-c", "exec 0<&-; sleep 30"])
            .stdin(Stdio::piped())
            .spawn()
            .unwrap();

        let text = "x".repeat(1 << 20);
        let err = feed(&mut child, "sh", &text).unwrap_err();
        assert!(matches!(err, ClipboardError::Tool { .. }));
        assert!(child.try_wait().unwrap().is_some());
    }
}
