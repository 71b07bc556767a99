// Request routing for tool calls and resource reads.
//
// The two flows share no state. Tool calls resolve a handler by name and turn
// any handler failure into an error-flagged tool response. Resource reads
// classify the URI first and only touch the filesystem for vetted URIs.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::types::ServerConfig;
use crate::core::resources::{
    APP_HTML_MIME, Classification, ResourceContents, ResourceStore, UiMeta, file_name,
};
use crate::core::tools::{ToolDescriptor, ToolRegistry};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ToolCall(ToolCall),
    ResourceRead(ResourceRead),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRead {
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Tool(ToolResponse),
    Resource(ReadResourceResponse),
}

/// Tool result envelope in `tools/call` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolResponse {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Text of the first content item.
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(ToolContent::Text { text }) => text,
            None => "",
        }
    }
}

/// Resource read envelope. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadResourceResponse {
    pub contents: Vec<ResourceContents>,
}

/// Entry for `resources/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub mime_type: String,
}

/// Owns the tool registry and resource store; shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: ToolRegistry,
    store: ResourceStore,
    ui_meta: UiMeta,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, store: ResourceStore) -> Self {
        Self {
            registry,
            store,
            ui_meta: UiMeta::default(),
        }
    }

    /// Built-in tools plus a store rooted at the configured resources dir.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Ok(Self::new(
            ToolRegistry::builtin()?,
            ResourceStore::new(config.ui_resources_dir.clone()),
        ))
    }

    /// Route a decoded request by kind. Only resource reads can fail here.
    pub fn dispatch(&self, request: Request) -> Result<Response> {
        match request {
            Request::ToolCall(call) => Ok(Response::Tool(self.respond_to_tool(&call))),
            Request::ResourceRead(read) => self.read_resource(&read).map(Response::Resource),
        }
    }

    /// Resolve and invoke a tool, keeping the typed failure.
    pub fn call_tool(&self, call: &ToolCall) -> Result<String> {
        let tool = self.registry.lookup(&call.name)?;
        debug!(tool = %tool.name, "invoking tool");
        tool.invoke(&call.arguments)
    }

    /// Like [`Dispatcher::call_tool`], with failures folded into an error response.
    pub fn respond_to_tool(&self, call: &ToolCall) -> ToolResponse {
        match self.call_tool(call) {
            Ok(text) => {
                info!(tool = %call.name, "tool call succeeded");
                ToolResponse::success(text)
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool call failed");
                ToolResponse::failure(e.to_string())
            }
        }
    }

    pub fn read_resource(&self, read: &ResourceRead) -> Result<ReadResourceResponse> {
        let uri = read.uri.as_str();
        let classification = self.store.classify(uri);
        info!(uri, ?classification, "resource read");

        let item = match classification {
            Classification::Special => {
                let body = self.store.read(uri)?;
                ResourceContents::app(uri, body, self.ui_meta.clone())
            }
            Classification::Fallback => ResourceContents::not_found(uri),
        };

        Ok(ReadResourceResponse {
            contents: vec![item],
        })
    }

    pub fn list_tools(&self) -> &[ToolDescriptor] {
        self.registry.list()
    }

    /// Only vetted URIs are advertised.
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.store
            .special_uris()
            .map(|uri| ResourceDescriptor {
                uri: uri.to_string(),
                name: file_name(uri).to_string(),
                mime_type: APP_HTML_MIME.into(),
            })
            .collect()
    }
}
