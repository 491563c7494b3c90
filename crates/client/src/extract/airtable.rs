//! Airtable records in a fixed set of known interfaces.

use richlinker_core::PageInfo;

use super::ExtractError;
use crate::page::{PageAccessor, text_content};

const TITLE_SELECTOR: &str = ".heading-size-default";

/// A known base+page with the label its records get.
#[derive(Debug, Clone, Copy)]
pub struct AirtableApp {
    pub base: &'static str,
    pub url: &'static str,
    pub label: &'static str,
}

pub const APPLICATIONS: &[AirtableApp] = &[
    AirtableApp {
        base: "listable",
        url: "https://airtable.com/apptivTqaoebkrmV1/pagYS8GHSAS9swLLI",
        label: "Listable Title",
    },
    AirtableApp {
        base: "escalations",
        url: "https://airtable.com/appWh5G6JXbHDKC2b/paguOM7Eb387ZUnRE",
        label: "Escalation Title",
    },
];

fn application_for(url: &str) -> Option<&'static AirtableApp> {
    APPLICATIONS.iter().find(|app| url.starts_with(app.url))
}

pub fn can_handle(url: &str) -> bool {
    application_for(url).is_some()
}

pub fn label_for(url: &str) -> &'static str {
    application_for(url).map_or("Record Title", |app| app.label)
}

pub fn extract(page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
    let heading = page.query(TITLE_SELECTOR).ok_or(ExtractError::MissingElement {
        extractor: "AirtableHandler",
        what: "record title",
        selector: TITLE_SELECTOR,
    })?;

    let title_text = text_content(heading);
    tracing::debug!(title = %title_text, base = ?application_for(page.url()).map(|a| a.base), "AirtableHandler: extracted");

    Ok(PageInfo::new(title_text, page.url()))
}
