//! Candidate clipboard formats and their HTML/plain-text payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label reserved for the bare-URL format.
pub const RAW_URL_LABEL: &str = "Raw URL";

/// One candidate clipboard representation of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    /// Short human-readable name (e.g. "Page Title", "Header: Intro...").
    pub label: String,
    /// Text shown inside the anchor and used as the plain-text fallback.
    pub link_text: String,
    /// URL the anchor points to.
    pub link_url: String,
}

impl Format {
    pub fn new(label: impl Into<String>, link_text: impl Into<String>, link_url: impl Into<String>) -> Self {
        Self { label: label.into(), link_text: link_text.into(), link_url: link_url.into() }
    }

    /// The bare-URL format: label "Raw URL", text and URL both `url`.
    pub fn raw_url(url: &str) -> Self {
        Self::new(RAW_URL_LABEL, url, url)
    }

    pub fn is_raw_url(&self) -> bool {
        self.label == RAW_URL_LABEL
    }

    /// Render the HTML/plain-text pair written to the clipboard.
    ///
    /// Raw URL formats copy only the URL; everything else becomes an anchor
    /// with a `text (url)` plain-text alternative.
    pub fn payload(&self) -> ClipboardPayload {
        if self.is_raw_url() {
            return ClipboardPayload { html: self.link_url.clone(), text: self.link_url.clone() };
        }

        ClipboardPayload {
            html: format!(
                "<a href=\"{href}\">{text}</a>",
                href = escape_html(&self.link_url),
                text = escape_html(&self.link_text)
            ),
            text: format!("{} ({})", self.link_text, self.link_url),
        }
    }
}

/// HTML and plain-text halves of one clipboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: String,
    pub text: String,
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
