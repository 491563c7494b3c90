//! Link data model: extraction results, candidate formats and fingerprints.

pub mod format;
pub mod page_info;

pub use format::{ClipboardPayload, Format, RAW_URL_LABEL};
pub use page_info::{Fingerprint, Header, LABEL_MAX, PREVIEW_MAX, PageInfo, Style, truncate};
