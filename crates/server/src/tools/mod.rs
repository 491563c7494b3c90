//! MCP tool implementations.
//!
//! Every tool receives a page snapshot (URL, HTML and optionally the live
//! document title) and resolves its formats before touching the engine.

pub mod link_copy;
pub mod link_copy_format;
pub mod link_formats;

pub use link_copy::{LinkCopyParams, copy_impl};
pub use link_copy_format::{LinkCopyFormatParams, copy_format_impl};
pub use link_formats::{LinkFormatsParams, formats_impl};

use richlinker_client::{CopyOutcome, HtmlPage, Resolution, resolve};
use richlinker_core::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The page to link, as seen by the host.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageSnapshot {
    /// Current location, including any fragment.
    pub url: String,

    /// Serialized DOM of the page.
    #[serde(default)]
    pub html: String,

    /// Live document title. Defaults to the `<title>` element of `html`.
    #[serde(default)]
    pub title: Option<String>,
}

impl PageSnapshot {
    /// Parse the snapshot and resolve its formats.
    ///
    /// Kept synchronous: the parsed DOM is not `Send` and must not live
    /// across an await point.
    pub fn resolve(&self) -> Result<Resolution, Error> {
        if self.url.trim().is_empty() {
            return Err(Error::InvalidInput("url cannot be empty".into()));
        }

        let page = match &self.title {
            Some(title) => HtmlPage::with_title(&self.url, title, &self.html)?,
            None => HtmlPage::new(&self.url, &self.html)?,
        };
        Ok(resolve(&page))
    }
}

/// One candidate format with its position in the cycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatEntry {
    pub index: usize,
    pub label: String,
    pub link_text: String,
    pub link_url: String,
}

/// Result of a copying tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyOutput {
    /// 0-based index of the copied format.
    pub index: usize,
    /// Number of candidate formats.
    pub total: usize,
    pub label: String,
    /// `text/html` half of the clipboard item.
    pub html: String,
    /// `text/plain` half of the clipboard item.
    pub text: String,
    pub notice: NoticeOutput,
}

/// The notification the host should show.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeOutput {
    pub message: String,
    pub color: String,
    pub duration_ms: u64,
}

impl From<CopyOutcome> for CopyOutput {
    fn from(outcome: CopyOutcome) -> Self {
        let payload = outcome.format.payload();
        let duration_ms = outcome.notification.duration_ms();
        Self {
            index: outcome.index,
            total: outcome.total,
            label: outcome.format.label,
            html: payload.html,
            text: payload.text,
            notice: NoticeOutput {
                message: outcome.notification.message,
                color: outcome.notification.color.to_string(),
                duration_ms,
            },
        }
    }
}

fn to_json<T: Serialize>(output: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(output).map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(url: &str, html: &str) -> PageSnapshot {
        PageSnapshot { url: url.into(), html: html.into(), title: None }
    }

    #[test]
    fn test_resolve_uses_title_element() {
        let resolution = snapshot("https://example.org/page", "<title>Hello World</title>").resolve().unwrap();
        assert_eq!(resolution.formats[0].link_text, "Hello World");
    }

    #[test]
    fn test_resolve_prefers_live_title() {
        let mut page = snapshot("https://example.org/page", "<title>Stale</title>");
        page.title = Some("Live".into());
        assert_eq!(page.resolve().unwrap().formats[0].link_text, "Live");
    }

    #[test]
    fn test_resolve_rejects_bad_url() {
        assert!(matches!(snapshot("", "").resolve(), Err(Error::InvalidInput(_))));
        assert!(matches!(snapshot("not a url", "").resolve(), Err(Error::InvalidUrl(_))));
    }
}
