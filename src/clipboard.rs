//! System clipboard access for copying image URLs.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),

    #[error("failed to set clipboard text: {0}")]
    Write(#[source] arboard::Error),
}

/// Opens the platform clipboard on first use and keeps it for later copies.
/// A failed open is retried on the next copy.
#[derive(Default)]
pub struct ClipboardHandler {
    clipboard: Option<Clipboard>,
}

impl ClipboardHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write text to the system clipboard.
    pub fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(ClipboardError::Unavailable)?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard
            .set_text(text.to_string())
            .map_err(ClipboardError::Write)
    }
}
