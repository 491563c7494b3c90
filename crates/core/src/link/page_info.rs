//! Normalized extraction result and the ordered format list it renders into.

use serde::{Deserialize, Serialize};

use super::format::Format;

/// Default truncation width for previews.
pub const PREVIEW_MAX: usize = 30;

/// Truncation width for header text inside format labels.
pub const LABEL_MAX: usize = 16;

/// Ordering of primary vs. secondary entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Base format first, header second.
    #[default]
    Normal,
    /// Header (pipeline execution) first, base second.
    Spinnaker,
}

/// Secondary entity on the page: a heading, a pipeline execution, a stack run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub text: String,
    pub url: String,
}

/// The normalized result of extraction.
///
/// Header text and header URL travel together in [`Header`], so one is never
/// present without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub title_text: String,
    pub title_url: String,
    pub header: Option<Header>,
    pub style: Style,
    /// Complete format list supplied by the extractor, used instead of
    /// [`PageInfo::formats`] when present.
    pub custom_formats: Option<Vec<Format>>,
}

impl PageInfo {
    pub fn new(title_text: impl Into<String>, title_url: impl Into<String>) -> Self {
        Self {
            title_text: title_text.into(),
            title_url: title_url.into(),
            header: None,
            style: Style::Normal,
            custom_formats: None,
        }
    }

    pub fn with_header(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.header = Some(Header { text: text.into(), url: url.into() });
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_custom_formats(mut self, formats: Vec<Format>) -> Self {
        self.custom_formats = Some(formats);
        self
    }

    pub fn header_text(&self) -> Option<&str> {
        self.header.as_ref().map(|h| h.text.as_str())
    }

    pub fn header_url(&self) -> Option<&str> {
        self.header.as_ref().map(|h| h.url.as_str())
    }

    /// Ordered formats for this page, without any Raw URL entry.
    ///
    /// Spinnaker style with a header puts the pipeline format first; every
    /// other combination puts the base format first and the header (if any)
    /// after it.
    pub fn formats(&self, base_label: &str) -> Vec<Format> {
        let base = Format::new(base_label, self.title_text.as_str(), self.title_url.as_str());

        let Some(header) = &self.header else {
            return vec![base];
        };

        match self.style {
            Style::Spinnaker => vec![
                Format::new(
                    format!("Pipeline: {}", truncate(&header.text, LABEL_MAX)),
                    format!("spinnaker: {}", header.text),
                    header.url.as_str(),
                ),
                base,
            ],
            Style::Normal => vec![
                base,
                Format::new(
                    format!("Header: {}", truncate(&header.text, LABEL_MAX)),
                    format!("{} #{}", self.title_text, header.text),
                    header.url.as_str(),
                ),
            ],
        }
    }

    /// [`PageInfo::formats`] followed by this page's own Raw URL entry.
    ///
    /// Standalone API for hosts that render one page's formats without the
    /// resolver. The resolver appends a single global Raw URL instead.
    pub fn formats_with_raw_url(&self, base_label: &str) -> Vec<Format> {
        let mut formats = self.formats(base_label);
        formats.push(Format::raw_url(&self.title_url));
        formats
    }

    /// Legacy two-format selection.
    ///
    /// Standalone API for hosts with a single "with header" toggle instead of
    /// the format cycle; the engine does not use it.
    ///
    /// Normal style links the header only when `include_header` is set;
    /// spinnaker style inverts that so the first selection is the pipeline.
    pub fn link_text_and_url(&self, include_header: bool) -> (String, String) {
        match (self.style, &self.header) {
            (Style::Spinnaker, Some(header)) if !include_header => {
                (format!("spinnaker: {}", header.text), header.url.clone())
            }
            (Style::Normal, Some(header)) if include_header => {
                (format!("{} #{}", self.title_text, header.text), header.url.clone())
            }
            _ => (self.title_text.clone(), self.title_url.clone()),
        }
    }

    /// Plain-text preview used in diagnostics.
    pub fn preview(&self, include_header: bool) -> String {
        let title = if self.title_text.is_empty() { "Untitled" } else { self.title_text.as_str() };
        let mut preview = format!("* title: {}", truncate(title, PREVIEW_MAX));

        if include_header && let Some(header) = self.header_text() {
            preview.push_str(&format!("\n* header: {}", truncate(header, PREVIEW_MAX)));
        }

        preview
    }

    /// The subset of fields that decides whether two invocations saw the same page.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            title_text: self.title_text.clone(),
            title_url: self.title_url.clone(),
            header_text: self.header_text().map(str::to_string),
            header_url: self.header_url().map(str::to_string),
            style: self.style,
        }
    }
}

/// Stored identity of an extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprint {
    pub title_text: String,
    pub title_url: String,
    pub header_text: Option<String>,
    pub header_url: Option<String>,
    #[serde(default)]
    pub style: Style,
}

/// Cut `text` to `max_len` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_len.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
