use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

const WL_COPY_COMMAND: &str = "wl-copy";
pub const MIME_TEXT_PLAIN_UTF8: &str = "text/plain;charset=utf-8";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run wl-copy command: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("wl-copy exited with non-zero status: {status}")]
    CommandFailed { status: String },
    #[error("refusing to copy empty {mime_type} payload")]
    EmptyPayload { mime_type: String },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

/// Write-only system clipboard.
pub trait ClipboardBackend {
    fn copy_bytes(&self, bytes: &[u8], mime_type: &str) -> ClipboardResult<()>;

    fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        self.copy_bytes(text.as_bytes(), MIME_TEXT_PLAIN_UTF8)
    }
}

#[derive(Debug, Default)]
pub struct WlCopyBackend;

fn wl_copy_args(mime_type: &str) -> [&str; 2] {
    ["--type", mime_type]
}

impl ClipboardBackend for WlCopyBackend {
    fn copy_bytes(&self, bytes: &[u8], mime_type: &str) -> ClipboardResult<()> {
        if bytes.is_empty() {
            return Err(ClipboardError::EmptyPayload {
                mime_type: mime_type.to_string(),
            });
        }
        let command_io = |source: io::Error| ClipboardError::CommandIo {
            command: WL_COPY_COMMAND.to_string(),
            source,
        };

        let mut child = Command::new(WL_COPY_COMMAND)
            .args(wl_copy_args(mime_type))
            .stdin(Stdio::piped())
            .spawn()
            .map_err(command_io)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(bytes).map_err(command_io)?;
        }
        let status = child.wait().map_err(command_io)?;

        if status.success() {
            tracing::debug!(mime_type, bytes = bytes.len(), "copied to clipboard");
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed {
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingBackend {
        copied: RefCell<Vec<(Vec<u8>, String)>>,
    }

    impl ClipboardBackend for RecordingBackend {
        fn copy_bytes(&self, bytes: &[u8], mime_type: &str) -> ClipboardResult<()> {
            self.copied
                .borrow_mut()
                .push((bytes.to_vec(), mime_type.to_string()));
            Ok(())
        }
    }

    #[test]
    fn copy_text_sends_utf8_plain_text() {
        let backend = RecordingBackend::default();
        backend.copy_text("#3B82F6").unwrap();
        assert_eq!(
            *backend.copied.borrow(),
            vec![(b"#3B82F6".to_vec(), MIME_TEXT_PLAIN_UTF8.to_string())]
        );
    }

    #[test]
    fn wl_copy_is_told_the_mime_type() {
        assert_eq!(wl_copy_args("image/png"), ["--type", "image/png"]);
    }

    #[test]
    fn empty_payload_is_rejected_before_spawning() {
        let err = WlCopyBackend.copy_text("").unwrap_err();
        assert!(matches!(err, ClipboardError::EmptyPayload { .. }));
    }

    #[test]
    fn command_error_contains_command_name() {
        let err = ClipboardError::CommandFailed {
            status: "exit status 1".to_string(),
        };
        assert!(format!("{err}").contains("wl-copy"));
    }
}
