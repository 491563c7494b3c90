//! Spinnaker pipeline executions.
//!
//! URLs look like `https://spinnaker.k8s.<env>.cloud/#/applications/<app>/executions[/<id>]`.
//! Without an execution id the page is the executions list and only the
//! application is linked. With one, the running pipeline's name becomes the
//! header and is offered first.

use richlinker_core::{PageInfo, Style};
use scraper::{ElementRef, Selector};

use super::ExtractError;
use crate::page::PageAccessor;

/// Application and optional execution addressed by a Spinnaker URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnakerUrl {
    pub application: String,
    pub execution_id: Option<String>,
}

pub fn parse_url(url: &str) -> Option<SpinnakerUrl> {
    if !url.contains("spinnaker.k8s.") || !url.contains(".cloud") {
        return None;
    }

    let (_, route) = url.split_once("#/")?;
    let route = route.split('?').next().unwrap_or(route);
    let parts: Vec<&str> = route.split('/').collect();

    if parts.len() < 3 || parts[0] != "applications" || parts[2] != "executions" {
        return None;
    }

    let application = parts[1];
    if application.is_empty() {
        return None;
    }

    let execution_id = parts.get(3).filter(|id| !id.is_empty()).map(|id| id.to_string());

    Some(SpinnakerUrl { application: application.to_string(), execution_id })
}

pub fn can_handle(url: &str) -> bool {
    parse_url(url).is_some()
}

pub fn extract(page: &dyn PageAccessor) -> Result<PageInfo, ExtractError> {
    let current_url = page.url();
    let parsed = parse_url(current_url)
        .ok_or_else(|| ExtractError::UnparseableUrl { extractor: "SpinnakerHandler", url: current_url.to_string() })?;

    tracing::debug!(application = %parsed.application, execution = ?parsed.execution_id, "SpinnakerHandler: parsed URL");

    let Some(execution_id) = parsed.execution_id else {
        let list_url = current_url.split('?').next().unwrap_or(current_url);
        return Ok(PageInfo::new(parsed.application, list_url).with_style(Style::Spinnaker));
    };

    let base_url = match current_url.split_once("/executions") {
        Some((prefix, _)) => format!("{prefix}/executions"),
        None => current_url.to_string(),
    };

    let info = PageInfo::new(parsed.application, base_url).with_style(Style::Spinnaker);

    match pipeline_name(page, &execution_id) {
        Some(name) => Ok(info.with_header(name, current_url)),
        None => Ok(info),
    }
}

/// Name of the pipeline that owns `execution_id`, read from the execution group heading.
///
/// Any missing anchor yields `None`; the execution still links without a header.
fn pipeline_name(page: &dyn PageAccessor, execution_id: &str) -> Option<String> {
    let Some(execution) = element_by_id(page, &format!("execution-{execution_id}")) else {
        tracing::debug!(execution_id, "SpinnakerHandler: execution element not found");
        return None;
    };

    let Some(group) = closest_with_class(execution, "execution-group") else {
        tracing::debug!("SpinnakerHandler: execution-group not found");
        return None;
    };

    let selector = Selector::parse("h4.execution-group-title").ok()?;
    let Some(heading) = group.select(&selector).next() else {
        tracing::debug!("SpinnakerHandler: h4.execution-group-title not found");
        return None;
    };

    // Direct text nodes only; nested spans carry badges and counters.
    let name = heading
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() { None } else { Some(name) }
}

fn element_by_id<'a>(page: &'a dyn PageAccessor, id: &str) -> Option<ElementRef<'a>> {
    page.document()
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().id() == Some(id))
}

fn closest_with_class<'a>(element: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|el| el.value().classes().any(|c| c == class))
}
