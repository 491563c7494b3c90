//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::clipboard::SystemClipboard;
use crate::notifier::TracingNotifier;
use crate::tools::{
    LinkCopyFormatParams, LinkCopyParams, LinkFormatsParams, copy_format_impl, copy_impl, formats_impl,
};

use richlinker_client::LinkEngine;
use richlinker_core::{AppConfig, ScratchStore};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use tokio::sync::Mutex;

/// Engine wired to the host's store, the desktop clipboard and the log.
pub type HostEngine = LinkEngine<Arc<dyn ScratchStore>, SystemClipboard, TracingNotifier>;

/// The main MCP server handler for richlinker.
#[derive(Clone)]
pub struct RichLinkServer {
    tool_router: ToolRouter<Self>,
    /// Serializes invocations so the cycle entry is read and written by one call at a time.
    engine: Arc<Mutex<HostEngine>>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl RichLinkServer {
    /// Create a new server handler over a scratch store.
    pub fn new(config: &AppConfig, store: Arc<dyn ScratchStore>) -> Self {
        let engine = LinkEngine::new(config, store, SystemClipboard, TracingNotifier);
        Self { tool_router: Self::tool_router(), engine: Arc::new(Mutex::new(engine)) }
    }

    /// List the candidate link formats for a page.
    #[tool(
        description = "List the rich-link formats available for a page (URL plus HTML snapshot). Returns formats in cycle order with their index. Nothing is copied."
    )]
    async fn link_formats(&self, params: Parameters<LinkFormatsParams>) -> Result<CallToolResult, McpError> {
        formats_impl(&params.0)
    }

    /// Copy the next format in the cycle.
    #[tool(
        description = "Copy a rich link for a page to the clipboard. Calling again on the same page within the cycle window copies the next format, wrapping around after the last."
    )]
    async fn link_copy(&self, params: Parameters<LinkCopyParams>) -> Result<CallToolResult, McpError> {
        copy_impl(&self.engine, params.0).await
    }

    /// Copy a specific format by index.
    #[tool(
        description = "Copy the format at the given index (from link_formats) to the clipboard and make it the current cycle position."
    )]
    async fn link_copy_format(&self, params: Parameters<LinkCopyFormatParams>) -> Result<CallToolResult, McpError> {
        copy_format_impl(&self.engine, params.0).await
    }
}

impl ServerHandler for RichLinkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "richlinker".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
