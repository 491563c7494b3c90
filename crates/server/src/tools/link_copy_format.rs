//! link_copy_format tool implementation.
//!
//! Copies a format picked from the `link_formats` listing and makes it the
//! current cycle position.

use richlinker_client::LinkEngine;
use richlinker_core::{Clock, ClipboardWriter, Notifier, ScratchStore};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{CopyOutput, PageSnapshot, to_json};

/// Parameters for the link_copy_format tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LinkCopyFormatParams {
    #[serde(flatten)]
    pub page: PageSnapshot,

    /// 0-based index into the list returned by link_formats.
    pub index: usize,
}

/// Implementation of the link_copy_format tool.
pub async fn copy_format_impl<S, W, N, C>(
    engine: &Mutex<LinkEngine<S, W, N, C>>, params: LinkCopyFormatParams,
) -> Result<CallToolResult, McpError>
where
    S: ScratchStore,
    W: ClipboardWriter,
    N: Notifier,
    C: Clock,
{
    let resolution = params.page.resolve()?;

    let outcome = engine.lock().await.copy_format(resolution, params.index).await?;
    let output = CopyOutput::from(outcome);

    Ok(CallToolResult::success(vec![Content::text(to_json(&output)?)]))
}
