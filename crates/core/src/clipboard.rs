//! Clipboard port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Error;
use crate::link::ClipboardPayload;

/// Writes an HTML/plain-text pair to the system clipboard as one item.
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns `Error::ClipboardFailed` when the write did not happen.
    async fn write(&self, payload: &ClipboardPayload) -> Result<(), Error>;
}

#[async_trait]
impl<T: ClipboardWriter + ?Sized> ClipboardWriter for Arc<T> {
    async fn write(&self, payload: &ClipboardPayload) -> Result<(), Error> {
        (**self).write(payload).await
    }
}
