//! Format resolution: specialized extractor, fallbacks, and one global Raw URL.
//!
//! Order of the resolved list:
//! 1. Formats of the first site-specific extractor that claims the URL and
//!    extracts successfully. A failed extraction is logged and skipped.
//! 2. The raw-title format, unless the specialized extractor declares it a
//!    duplicate.
//! 3. Exactly one Raw URL format for the current URL.
//!
//! An extractor that supplies its own complete format list (custom formats)
//! replaces all three steps. An empty custom list resolves to the Raw URL
//! alone.

use richlinker_core::{Format, PageInfo};

use crate::extract::{Extractor, fallback};
use crate::page::PageAccessor;

/// Resolved formats plus the extraction result they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Specialized extractor that produced `page_info`, if any.
    pub handler: Option<Extractor>,
    /// Fingerprint source for format cycling.
    pub page_info: PageInfo,
    /// Candidate formats, never empty.
    pub formats: Vec<Format>,
}

impl Resolution {
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Resolve the ordered format list for the current page.
pub fn resolve(page: &dyn PageAccessor) -> Resolution {
    let url = page.url();
    tracing::debug!(url, "resolving formats");

    let specialized = Extractor::specialized_for(url).and_then(|extractor| {
        tracing::debug!(handler = %extractor, "specialized handler matched");
        match extractor.extract_info(page) {
            Ok(info) => {
                tracing::debug!(handler = %extractor, preview = %info.preview(true), "extracted page info");
                Some((extractor, info))
            }
            Err(e) => {
                tracing::warn!(handler = %extractor, error = %e, "extraction failed, using fallbacks");
                None
            }
        }
    });

    let raw_title = fallback::raw_title(page);
    let raw_url = fallback::raw_url(page).custom_formats.unwrap_or_default();

    match specialized {
        Some((extractor, info)) => {
            let formats = assemble(Some((extractor, &info)), &raw_title, raw_url);
            Resolution { handler: Some(extractor), page_info: info, formats }
        }
        None => {
            let formats = assemble(None, &raw_title, raw_url);
            Resolution { handler: None, page_info: raw_title, formats }
        }
    }
}

/// Concatenate specialized, raw-title and raw-URL formats.
///
/// A non-empty custom list stands alone; an empty one leaves only the Raw URL.
fn assemble(specialized: Option<(Extractor, &PageInfo)>, raw_title: &PageInfo, raw_url: Vec<Format>) -> Vec<Format> {
    let url = raw_title.title_url.as_str();
    let mut formats = Vec::new();

    match specialized {
        Some((_, PageInfo { custom_formats: Some(custom), .. })) => {
            if !custom.is_empty() {
                return custom.clone();
            }
        }
        Some((extractor, info)) => {
            formats.extend(info.formats(extractor.base_label(url)));
            if !extractor.skip_raw_title() {
                formats.extend(raw_title.formats(Extractor::RawTitle.base_label(url)));
            }
        }
        None => formats.extend(raw_title.formats(Extractor::RawTitle.base_label(url))),
    }

    formats.extend(raw_url);
    formats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;

    fn page(url: &str, html: &str) -> HtmlPage {
        HtmlPage::new(url, html).unwrap()
    }

    #[test]
    fn test_unmatched_page() {
        let resolution = resolve(&page("https://example.org/page", "<title>Hello World</title>"));
        assert_eq!(resolution.handler, None);
        assert_eq!(
            resolution.formats,
            vec![
                Format::new("Page Title", "Hello World", "https://example.org/page"),
                Format::raw_url("https://example.org/page"),
            ]
        );
    }

    #[test]
    fn test_github_pr() {
        let url = "https://github.com/acme/widget/pull/42";
        let resolution = resolve(&page(url, r#"<h1 class="gh-header-title">Fix crash on startup</h1>"#));
        assert_eq!(resolution.handler, Some(Extractor::GitHub));
        assert_eq!(
            resolution.formats,
            vec![
                Format::new("PR Title", "Fix crash on startup", url),
                Format::raw_url(url),
            ]
        );
    }

    #[test]
    fn test_extraction_failure_degrades_to_fallbacks() {
        let url = "https://github.com/acme/widget/pull/42";
        let resolution = resolve(&page(url, "<title>Some PR</title>"));
        assert_eq!(resolution.handler, None);
        assert_eq!(resolution.formats, vec![Format::new("Page Title", "Some PR", url), Format::raw_url(url)]);
    }

    #[test]
    fn test_skip_raw_title() {
        let url = "https://airtable.com/apptivTqaoebkrmV1/pagYS8GHSAS9swLLI/rec1";
        let resolution = resolve(&page(url, r#"<div class="heading-size-default">Broken export</div>"#));
        assert_eq!(
            resolution.formats,
            vec![Format::new("Listable Title", "Broken export", url), Format::raw_url(url)]
        );
    }

    #[test]
    fn test_custom_formats_are_complete() {
        let url = "https://spacelift.shadowbox.cloud/stack/svc-prod/run/01J";
        let resolution = resolve(&page(url, "<title>refactor config · svc-prod | Spacelift</title>"));
        assert_eq!(resolution.handler, Some(Extractor::Spacelift));
        assert_eq!(resolution.len(), 2);
        assert!(resolution.formats.iter().all(|f| !f.is_raw_url()));
    }

    #[test]
    fn test_header_formats_then_raw_title() {
        let url = "https://docs.google.com/document/d/1AbC/edit#heading=h.1";
        let html = r#"<title>Handbook - Google Docs</title>
            <div class="navigation-item location-indicator-highlight">
              <div class="navigation-item-content" data-tooltip="Introduction to the team"></div>
            </div>"#;
        let resolution = resolve(&page(url, html));
        let labels: Vec<_> = resolution.formats.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Doc Title", "Header: Introduction ...", "Page Title", "Raw URL"]);
        assert_eq!(resolution.formats[1].link_text, "Handbook #Introduction to the team");
        assert_eq!(resolution.formats[2].link_text, "Handbook - Google Docs");
    }

    #[test]
    fn test_exactly_one_raw_url() {
        for (url, html) in [
            ("https://example.org/", "<title>x</title>"),
            ("https://github.com/a/b/pull/1", r#"<h1 class="gh-header-title">t</h1>"#),
            ("https://acme.atlassian.net/wiki/spaces/X/pages/1", "<title>P - S - Confluence</title>"),
        ] {
            let resolution = resolve(&page(url, html));
            assert_eq!(resolution.formats.iter().filter(|f| f.is_raw_url()).count(), 1);
            assert!(resolution.formats.last().unwrap().is_raw_url());
        }
    }

    #[test]
    fn test_empty_custom_formats_leave_raw_url() {
        let url = "https://spacelift.shadowbox.cloud/stack/svc-prod/run/01J";
        let info = PageInfo::new("spacelift: svc-prod", url).with_custom_formats(Vec::new());
        let raw_title = PageInfo::new("Run", url);

        let formats = assemble(Some((Extractor::Spacelift, &info)), &raw_title, vec![Format::raw_url(url)]);
        assert_eq!(formats, vec![Format::raw_url(url)]);
    }

    #[test]
    fn test_raw_url_comes_from_fallback() {
        let url = "https://example.org/page#section";
        let resolution = resolve(&page(url, "<title>Hello World</title>"));
        let expected = Extractor::RawUrl.extract_info(&page(url, "")).unwrap().custom_formats.unwrap();
        assert_eq!(resolution.formats.last(), expected.last());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let p = page("https://example.org/page", "<title>Hello World</title>");
        assert_eq!(resolve(&p), resolve(&p));
    }
}
