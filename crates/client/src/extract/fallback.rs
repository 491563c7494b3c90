//! Universal fallbacks: raw document title and raw URL.

use richlinker_core::{Format, PageInfo};

use crate::page::PageAccessor;

pub fn raw_title(page: &dyn PageAccessor) -> PageInfo {
    let title = page.title();
    let title = if title.is_empty() { "Untitled" } else { title };
    PageInfo::new(title, page.url())
}

/// The bare-URL format; the resolver appends it after all other formats.
pub fn raw_url(page: &dyn PageAccessor) -> PageInfo {
    let url = page.url();
    PageInfo::new(url, url).with_custom_formats(vec![Format::raw_url(url)])
}
