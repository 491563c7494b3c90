//! link_copy tool implementation.
//!
//! Copies the next format in the cycle. Repeating the call on the same page
//! within the cycle window steps through the formats and wraps around.

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

/// Parameters for the link_copy tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LinkCopyParams {
    #[serde(flatten)]
    pub page: PageSnapshot,
}

/// Implementation of the link_copy tool.
pub async fn copy_impl<S, W, N, C>(
    engine: &Mutex<LinkEngine<S, W, N, C>>, params: LinkCopyParams,
) -> Result<CallToolResult, McpError>
where
    S: ScratchStore,
    W: ClipboardWriter,
    N: Notifier,
    C: Clock,
{
    let resolution = params.page.resolve()?;

    let outcome = engine.lock().await.execute(resolution).await?;
    let output = CopyOutput::from(outcome);

    Ok(CallToolResult::success(vec![Content::text(to_json(&output)?)]))
}
