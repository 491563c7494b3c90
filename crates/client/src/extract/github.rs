//! GitHub pull requests.

use richlinker_core::PageInfo;

use super::ExtractError;
use crate::page::{PageAccessor, text_content};

const TITLE_SELECTOR: &str = ".gh-header-title";

/// Match `https://github.com/<org>/<repo>/pull/<digits>[/...]`.
pub fn can_handle(url: &str) -> bool {
    if !url.contains("github.com/") {
        return false;
    }

    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 7 {
        return false;
    }

    parts[0] == "https:"
        && parts[1].is_empty()
        && parts[2] == "github.com"
        && !parts[3].is_empty()
        && !parts[4].is_empty()
        && parts[5] == "pull"
        && !parts[6].is_empty()
        && parts[6].bytes().all(|b| b.is_ascii_digit())
}

pub fn extract(page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
    let heading = page.query(TITLE_SELECTOR).ok_or(ExtractError::MissingElement {
        extractor: "GitHubHandler",
        what: "PR title",
        selector: TITLE_SELECTOR,
    })?;

    Ok(PageInfo::new(text_content(heading), page.url()))
}
