use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListResourcesResult, ListToolsResult,
    PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use shell_mcp::core::dispatch::{Dispatcher, Request, ResourceRead, ToolCall};

use super::format;

pub const SERVER_NAME: &str = "shell-mcp";

const INSTRUCTIONS: &str = "Shell tools for this host. `run-shell-command` echoes the command \
into its attached UI; `execute-shell-command` runs it and returns standard output.";

/// rmcp handler that forwards every tool and resource request to the dispatcher.
#[derive(Clone)]
pub struct ShellMcpServer {
    dispatcher: Arc<Dispatcher>,
}

impl ShellMcpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl ServerHandler for ShellMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        format::tool_list(self.dispatcher.list_tools())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let call = Request::ToolCall(ToolCall {
            name: request.name.to_string(),
            arguments: request.arguments.unwrap_or_default(),
        });

        // Shell commands block; keep them off the async workers.
        let dispatcher = Arc::clone(&self.dispatcher);
        let response = tokio::task::spawn_blocking(move || dispatcher.dispatch(call))
            .await
            .map_err(|e| McpError::internal_error(format!("tool task failed: {e}"), None))?
            .map_err(|e| format::request_error(&e))?;

        format::call_result(response)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        format::resource_list(&self.dispatcher.list_resources())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let read = Request::ResourceRead(ResourceRead { uri: request.uri });
        let response = self
            .dispatcher
            .dispatch(read)
            .map_err(|e| format::request_error(&e))?;
        format::read_response(response)
    }
}
