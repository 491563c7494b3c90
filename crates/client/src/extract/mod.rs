//! Per-site extractors and the handler registry.
//!
//! ### Registry
//! - [`REGISTRY`] is the one ordered list of extractors. Every consumer
//!   (resolver, engine, hosts, tests) reads it from here.
//! - Site-specific extractors come first in priority order, followed by the
//!   two universal fallbacks: raw title, then raw URL.
//!
//! ### Matching
//! - `can_handle` looks at the URL string only, never the DOM, and is
//!   deliberately conservative: a false match turns into an extraction error.
//!
//! ### Extraction
//! - `extract_info` reads the page through [`PageAccessor`] and fails with
//!   [`ExtractError`] when the expected structure is missing.

pub mod airtable;
pub mod atlassian;
pub mod fallback;
pub mod github;
pub mod google_docs;
pub mod spacelift;
pub mod spinnaker;

use richlinker_core::{Error, PageInfo};

use crate::page::PageAccessor;

/// Errors raised while scraping a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("{extractor}: could not find {what} ({selector})")]
    MissingElement { extractor: &'static str, what: &'static str, selector: &'static str },

    #[error("{extractor}: could not parse URL {url}")]
    UnparseableUrl { extractor: &'static str, url: String },

    #[error("{extractor}: could not parse title {title:?}")]
    UnparseableTitle { extractor: &'static str, title: String },
}

impl From<ExtractError> for Error {
    fn from(err: ExtractError) -> Self {
        Error::ExtractFailed(err.to_string())
    }
}

/// Closed set of page extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// Document collaboration tool.
    GoogleDocs,
    /// Wiki / knowledge base.
    Atlassian,
    /// Tabular database app.
    Airtable,
    /// Code-hosting pull requests.
    GitHub,
    /// CI/CD pipeline viewer.
    Spinnaker,
    /// Infra-as-code run viewer.
    Spacelift,
    /// Universal fallback: document title.
    RawTitle,
    /// Universal fallback: bare URL. Always matches.
    RawUrl,
}

/// Every extractor, in dispatch order.
pub const REGISTRY: [Extractor; 8] = [
    Extractor::GoogleDocs,
    Extractor::Atlassian,
    Extractor::Airtable,
    Extractor::GitHub,
    Extractor::Spinnaker,
    Extractor::Spacelift,
    Extractor::RawTitle,
    Extractor::RawUrl,
];

impl Extractor {
    pub fn registry() -> &'static [Extractor] {
        &REGISTRY
    }

    /// First site-specific extractor that claims `url`.
    pub fn specialized_for(url: &str) -> Option<Extractor> {
        REGISTRY
            .iter()
            .copied()
            .filter(|e| !e.is_fallback())
            .find(|e| e.can_handle(url))
    }

    pub fn name(self) -> &'static str {
        match self {
            Extractor::GoogleDocs => "GoogleDocsHandler",
            Extractor::Atlassian => "AtlassianHandler",
            Extractor::Airtable => "AirtableHandler",
            Extractor::GitHub => "GitHubHandler",
            Extractor::Spinnaker => "SpinnakerHandler",
            Extractor::Spacelift => "SpaceliftHandler",
            Extractor::RawTitle => "RawTitleHandler",
            Extractor::RawUrl => "RawUrlHandler",
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Extractor::RawTitle | Extractor::RawUrl)
    }

    pub fn can_handle(self, url: &str) -> bool {
        match self {
            Extractor::GoogleDocs => google_docs::can_handle(url),
            Extractor::Atlassian => atlassian::can_handle(url),
            Extractor::Airtable => airtable::can_handle(url),
            Extractor::GitHub => github::can_handle(url),
            Extractor::Spinnaker => spinnaker::can_handle(url),
            Extractor::Spacelift => spacelift::can_handle(url),
            Extractor::RawTitle | Extractor::RawUrl => true,
        }
    }

    pub fn extract_info(self, page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
        match self {
            Extractor::GoogleDocs => google_docs::extract(page),
            Extractor::Atlassian => atlassian::extract(page),
            Extractor::Airtable => airtable::extract(page),
            Extractor::GitHub => github::extract(page),
            Extractor::Spinnaker => spinnaker::extract(page),
            Extractor::Spacelift => spacelift::extract(page),
            Extractor::RawTitle => Ok(fallback::raw_title(page)),
            Extractor::RawUrl => Ok(fallback::raw_url(page)),
        }
    }

    /// Label of the primary format. Airtable labels depend on which app `url` is in.
    pub fn base_label(self, url: &str) -> &'static str {
        match self {
            Extractor::GoogleDocs => "Doc Title",
            Extractor::Atlassian | Extractor::RawTitle => "Page Title",
            Extractor::Airtable => airtable::label_for(url),
            Extractor::GitHub => "PR Title",
            Extractor::Spacelift => "stack",
            Extractor::RawUrl => richlinker_core::link::RAW_URL_LABEL,
            Extractor::Spinnaker => "Base",
        }
    }

    /// Whether the raw-title fallback format would duplicate this extractor's primary format.
    pub fn skip_raw_title(self) -> bool {
        matches!(self, Extractor::Atlassian | Extractor::Airtable | Extractor::GitHub | Extractor::Spacelift)
    }
}

impl std::fmt::Display for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
