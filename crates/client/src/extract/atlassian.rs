//! Confluence wiki pages.

use richlinker_core::PageInfo;

use super::ExtractError;
use crate::page::PageAccessor;

pub fn can_handle(url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };

    parsed.host_str().is_some_and(|host| host.ends_with(".atlassian.net")) && parsed.path().starts_with("/wiki/spaces/")
}

pub fn extract(page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
    let raw = page.title();
    let raw = if raw.is_empty() { "Atlassian Wiki Page" } else { raw };
    let title_text = clean_title(raw);

    tracing::debug!(raw = %raw, cleaned = %title_text, "AtlassianHandler: cleaned title");

    Ok(PageInfo::new(title_text, page.url()))
}

/// Drop the trailing space name and product name ("Page - Space - Confluence").
fn clean_title(raw: &str) -> String {
    let parts: Vec<&str> = raw.split(" - ").collect();
    if parts.len() > 2 { parts[..parts.len() - 2].join(" - ") } else { raw.to_string() }
}
