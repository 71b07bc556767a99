// Conversions from dispatcher responses to rmcp model types.
//
// Dispatcher types already serialize in MCP wire shape, so list and resource
// results are re-shaped through serde. That keeps `_meta` blocks intact
// without mirroring every model field by hand.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content, ListResourcesResult, ListToolsResult, ReadResourceResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use shell_mcp::core::dispatch::{
    ReadResourceResponse, ResourceDescriptor, Response, ToolContent, ToolResponse,
};
use shell_mcp::core::tools::ToolDescriptor;
use shell_mcp::error::ShellMcpError;

fn to_model<T: DeserializeOwned>(value: impl Serialize) -> Result<T, McpError> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(|e| McpError::internal_error(format!("malformed response: {e}"), None))
}

/// Tool outcome for `tools/call`. Failures stay inside the result.
pub fn tool_result(response: &ToolResponse) -> CallToolResult {
    let content = response
        .content
        .iter()
        .map(|item| match item {
            ToolContent::Text { text } => Content::text(text.clone()),
        })
        .collect();

    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

/// `tools/call` answer from a routed request.
pub fn call_result(response: Response) -> Result<CallToolResult, McpError> {
    match response {
        Response::Tool(tool) => Ok(tool_result(&tool)),
        Response::Resource(_) => Err(wrong_kind("tools/call")),
    }
}

/// `resources/read` answer from a routed request.
pub fn read_response(response: Response) -> Result<ReadResourceResult, McpError> {
    match response {
        Response::Resource(read) => read_result(&read),
        Response::Tool(_) => Err(wrong_kind("resources/read")),
    }
}

fn wrong_kind(method: &str) -> McpError {
    McpError::internal_error(format!("{method} routed to the wrong handler"), None)
}

pub fn tool_list(tools: &[ToolDescriptor]) -> Result<ListToolsResult, McpError> {
    to_model(json!({ "tools": tools }))
}

pub fn resource_list(resources: &[ResourceDescriptor]) -> Result<ListResourcesResult, McpError> {
    to_model(json!({ "resources": resources }))
}

pub fn read_result(response: &ReadResourceResponse) -> Result<ReadResourceResult, McpError> {
    to_model(response)
}

/// Dispatch failures are request-level errors. A failed read of a vetted
/// resource names the URI and the file it mapped to.
pub fn request_error(err: &ShellMcpError) -> McpError {
    match err {
        ShellMcpError::ResourceRead { uri, path, .. } => McpError::internal_error(
            err.to_string(),
            Some(json!({ "uri": uri, "path": path })),
        ),
        other => McpError::internal_error(other.to_string(), None),
    }
}
