//! Spacelift stack runs.
//!
//! Offers exactly two formats: the run (annotated with the PR that triggered
//! it) and the stack.

use richlinker_core::{Format, PageInfo};

use super::ExtractError;
use crate::page::PageAccessor;

const HOST: &str = "spacelift.shadowbox.cloud";

/// Stack and run addressed by a Spacelift URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceliftUrl {
    pub stack: String,
    pub run_id: String,
}

/// Parse `https://spacelift.shadowbox.cloud/stack/<stack>/run/<run>[/...]`.
pub fn parse_url(url: &str) -> Option<SpaceliftUrl> {
    if !url.contains("spacelift.shadowbox.cloud/stack/") {
        return None;
    }

    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 7 {
        return None;
    }

    let valid = parts[2] == HOST
        && parts[3] == "stack"
        && !parts[4].is_empty()
        && parts[5] == "run"
        && !parts[6].is_empty();

    valid.then(|| SpaceliftUrl { stack: parts[4].to_string(), run_id: parts[6].to_string() })
}

/// Run description from `"<description> · <stack> | Spacelift"`.
pub fn parse_title(title: &str) -> Option<&str> {
    if !title.contains(" | Spacelift") {
        return None;
    }

    title.split_once(" · ").map(|(description, _)| description)
}

pub fn can_handle(url: &str) -> bool {
    parse_url(url).is_some()
}

pub fn extract(page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
    let current_url = page.url();
    let parsed = parse_url(current_url)
        .ok_or_else(|| ExtractError::UnparseableUrl { extractor: "SpaceliftHandler", url: current_url.to_string() })?;

    let description = parse_title(page.title()).ok_or_else(|| ExtractError::UnparseableTitle {
        extractor: "SpaceliftHandler",
        title: page.title().to_string(),
    })?;

    let stack_url = current_url.split("/run/").next().unwrap_or(current_url);
    let stack_text = format!("spacelift: {}", parsed.stack);
    let run_text = format!("spacelift: {} (due to {description})", parsed.stack);

    tracing::debug!(stack = %parsed.stack, run = %parsed.run_id, "SpaceliftHandler: parsed run");

    let formats = vec![
        Format::new("spacelift stack with PR", run_text.as_str(), current_url),
        Format::new("stack", stack_text.as_str(), stack_url),
    ];

    Ok(PageInfo::new(stack_text, stack_url)
        .with_header(run_text, current_url)
        .with_custom_formats(formats))
}
