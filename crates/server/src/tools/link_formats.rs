//! link_formats tool implementation.
//!
//! Lists the candidate formats for a page without copying anything.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{FormatEntry, PageSnapshot, to_json};

/// Parameters for the link_formats tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LinkFormatsParams {
    #[serde(flatten)]
    pub page: PageSnapshot,
}

/// Output from the link_formats tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkFormatsOutput {
    /// Site handler that produced the formats, if any matched and succeeded.
    pub handler_name: Option<String>,
    /// Candidate formats in cycle order.
    pub formats: Vec<FormatEntry>,
}

/// Implementation of the link_formats tool.
pub fn formats_impl(params: &LinkFormatsParams) -> Result<CallToolResult, McpError> {
    let resolution = params.page.resolve()?;

    let output = LinkFormatsOutput {
        handler_name: resolution.handler.map(|h| h.name().to_string()),
        formats: resolution
            .formats
            .into_iter()
            .enumerate()
            .map(|(index, f)| FormatEntry { index, label: f.label, link_text: f.link_text, link_url: f.link_url })
            .collect(),
    };

    Ok(CallToolResult::success(vec![Content::text(to_json(&output)?)]))
}
