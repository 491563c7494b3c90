//! Read-only access to the page being linked.
//!
//! Extractors see the page only through [`PageAccessor`]: its URL, its
//! document title and its DOM.

use scraper::{ElementRef, Html, Selector};
use richlinker_core::Error;

/// The current page as seen by an extractor.
pub trait PageAccessor {
    /// Current location, including any fragment.
    fn url(&self) -> &str;

    /// Document title (may be empty).
    fn title(&self) -> &str;

    /// Parsed DOM.
    fn document(&self) -> &Html;

    /// First element matching a CSS selector, if any.
    ///
    /// An unparseable selector matches nothing.
    fn query(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        let first = self.document().select(&selector).next();
        first
    }
}

/// A page snapshot: URL plus HTML.
pub struct HtmlPage {
    url: String,
    title: String,
    document: Html,
}

impl HtmlPage {
    /// Parse `html` as the document at `url`, taking the title from `<title>`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if `url` is not an absolute URL.
    pub fn new(url: &str, html: &str) -> Result<Self, Error> {
        let document = Html::parse_document(html);
        let title = document_title(&document);
        Self::build(url, title, document)
    }

    /// Like [`HtmlPage::new`] but with the title supplied by the host.
    pub fn with_title(url: &str, title: &str, html: &str) -> Result<Self, Error> {
        Self::build(url, title.to_string(), Html::parse_document(html))
    }

    fn build(url: &str, title: String, document: Html) -> Result<Self, Error> {
        let url = url.trim();
        url::Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self { url: url.to_string(), title, document })
    }
}

impl PageAccessor for HtmlPage {
    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn document(&self) -> &Html {
        &self.document
    }
}

impl std::fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlPage").field("url", &self.url).field("title", &self.title).finish_non_exhaustive()
    }
}

/// `document.title`: first `<title>` text with whitespace collapsed.
fn document_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|title| collapse_whitespace(&title.text().collect::<String>()))
        .unwrap_or_default()
}

/// Trimmed `textContent` of an element.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
