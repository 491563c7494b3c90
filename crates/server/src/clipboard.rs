//! System clipboard writer.
//!
//! Sets `text/html` with a `text/plain` alternative in one call so both
//! representations land as a single clipboard item.

use async_trait::async_trait;
use arboard::Clipboard;
use richlinker_core::link::ClipboardPayload;
use richlinker_core::{ClipboardWriter, Error};

/// Writes to the desktop clipboard through `arboard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write(&self, payload: &ClipboardPayload) -> Result<(), Error> {
        let ClipboardPayload { html, text } = payload.clone();

        // arboard talks to the windowing system synchronously.
        tokio::task::spawn_blocking(move || {
            let mut clipboard = Clipboard::new().map_err(|e| Error::ClipboardFailed(e.to_string()))?;
            clipboard
                .set_html(html.as_str(), Some(text.as_str()))
                .map_err(|e| Error::ClipboardFailed(e.to_string()))
        })
        .await
        .map_err(|e| Error::ClipboardFailed(format!("clipboard task failed: {e}")))?
    }
}
