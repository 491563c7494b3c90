//! Google Docs: document title plus the heading highlighted in the outline.

use std::sync::LazyLock;

use regex::Regex;
use richlinker_core::PageInfo;
use scraper::{ElementRef, Selector};

use super::ExtractError;
use crate::page::{PageAccessor, text_content};

/// Matched without its leading space so collapsed and raw titles agree.
const TITLE_SUFFIX: &str = "- Google Docs";

const HIGHLIGHTED_ITEM: &str = ".navigation-item.location-indicator-highlight";

/// Trailing outline depth in aria labels ("Team rituals level 2").
#[allow(clippy::expect_used)]
static LEVEL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" level \d+$").expect("valid regex"));

pub fn can_handle(url: &str) -> bool {
    url.contains("docs.google.com/document/d/")
}

pub fn extract(page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
    let title = page.title();
    let title_text = title.strip_suffix(TITLE_SUFFIX).map_or(title, str::trim_end);
    let title_text = if title_text.is_empty() { "Untitled Document" } else { title_text };

    let current_url = page.url();
    let title_url = current_url.split('#').next().unwrap_or(current_url);

    let info = PageInfo::new(title_text, title_url);

    match current_heading(page) {
        Some(heading) => {
            tracing::debug!(heading = %heading, "GoogleDocsHandler: found heading");
            Ok(info.with_header(heading, current_url))
        }
        None => {
            tracing::debug!("GoogleDocsHandler: no current heading detected");
            Ok(info)
        }
    }
}

/// Text of the highlighted outline entry: tooltip, then text, then aria-label.
fn current_heading(page: &dyn PageAccessor) -> Option<String> {
    let item = page.query(HIGHLIGHTED_ITEM)?;

    let content = first_match(item, ".navigation-item-content");
    if let Some(content) = content {
        if let Some(tooltip) = content.value().attr("data-tooltip").filter(|t| !t.is_empty()) {
            return Some(tooltip.to_string());
        }

        let text = text_content(content);
        if !text.is_empty() {
            return Some(text);
        }
    }

    let label = first_match(item, ".navigation-item-content-container")?
        .value()
        .attr("aria-label")
        .filter(|l| !l.is_empty())?;

    Some(LEVEL_SUFFIX.replace(label, "").into_owned())
}

fn first_match<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    let first = scope.select(&selector).next();
    first
}
