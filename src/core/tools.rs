use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::resources::RUN_SHELL_COMMAND_URI;
use crate::core::shell;
use crate::error::{Result, ShellMcpError};

pub const RUN_SHELL_COMMAND: &str = "run-shell-command";
pub const EXECUTE_SHELL_COMMAND: &str = "execute-shell-command";

/// Metadata key hosts read to find the UI resource attached to a tool.
pub const RESOURCE_URI_META_KEY: &str = "ui/resourceUri";

/// Arguments shared by both shell tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShellCommandArgs {
    /// The command to execute
    #[serde(rename = "shellCommand")]
    pub shell_command: String,
}

impl ShellCommandArgs {
    fn from_arguments(tool: &str, arguments: &Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(arguments.clone())).map_err(|e| {
            ShellMcpError::InvalidArguments {
                tool: tool.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// JSON schema advertised as `inputSchema`, without the Rust type's
    /// name and doc comment.
    fn input_schema() -> Map<String, Value> {
        let mut schema = schemars::schema_for!(ShellCommandArgs)
            .as_object()
            .cloned()
            .unwrap_or_default();
        schema.remove("title");
        schema.remove("description");
        schema
    }
}

/// What a tool does when invoked. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolHandler {
    /// Returns the command text unchanged; the attached UI does the rest.
    Echo,
    /// Runs the command and returns its standard output.
    Execute,
}

impl ToolHandler {
    pub fn invoke(self, tool: &str, arguments: &Map<String, Value>) -> Result<String> {
        let args = ShellCommandArgs::from_arguments(tool, arguments)?;
        match self {
            Self::Echo => Ok(args.shell_command),
            Self::Execute => shell::execute(&args.shell_command),
        }
    }
}

/// A registered tool, serialized in the shape `tools/list` expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_schema: Map<String, Value>,
    /// Opaque to the registry; forwarded verbatim.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(skip)]
    pub handler: ToolHandler,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, handler: ToolHandler) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            input_schema: ShellCommandArgs::input_schema(),
            meta: None,
            handler,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn invoke(&self, arguments: &Map<String, Value>) -> Result<String> {
        self.handler.invoke(&self.name, arguments)
    }
}

/// Name-to-tool table. Filled once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two shell tools this server exposes.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(
            ToolDescriptor::new(RUN_SHELL_COMMAND, ToolHandler::Echo)
                .title("Run Shell Command")
                .description("Run shell command on server")
                .meta(RESOURCE_URI_META_KEY, RUN_SHELL_COMMAND_URI),
        )?;
        registry.register(
            ToolDescriptor::new(EXECUTE_SHELL_COMMAND, ToolHandler::Execute)
                .title("Execute shell command")
                .description(
                    "Execute shell command at the server. This tool can only be called by human.",
                ),
        )?;
        Ok(registry)
    }

    pub fn register(&mut self, tool: ToolDescriptor) -> Result<()> {
        if self.tools.iter().any(|t| t.name == tool.name) {
            return Err(ShellMcpError::DuplicateTool(tool.name));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor> {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ShellMcpError::UnknownTool(name.to_string()))
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(command: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("shellCommand".into(), Value::String(command.into()));
        map
    }

    #[test]
    fn builtin_registers_both_tools_in_order() {
        let registry = ToolRegistry::builtin().unwrap();
        let names: Vec<&str> = registry.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![RUN_SHELL_COMMAND, EXECUTE_SHELL_COMMAND]);
    }

    #[test]
    fn echo_returns_input_verbatim() {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.lookup(RUN_SHELL_COMMAND).unwrap();
        for input in ["ls -la", "", "  spaced  ", "rm -rf / # nope", "ünïcødé\n"] {
            assert_eq!(tool.invoke(&args(input)).unwrap(), input);
        }
    }

    #[test]
    fn unknown_tool_lookup_fails_with_name() {
        let registry = ToolRegistry::builtin().unwrap();
        let err = registry.lookup("run_shell_command").unwrap_err();
        assert!(matches!(err, ShellMcpError::UnknownTool(ref n) if n == "run_shell_command"));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = ToolRegistry::builtin().unwrap();
        let err = registry
            .register(ToolDescriptor::new(RUN_SHELL_COMMAND, ToolHandler::Execute))
            .unwrap_err();
        assert!(matches!(err, ShellMcpError::DuplicateTool(_)));
        assert_eq!(registry.list().len(), 2);
        assert_eq!(registry.lookup(RUN_SHELL_COMMAND).unwrap().handler, ToolHandler::Echo);
    }

    #[test]
    fn missing_argument_is_invalid() {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.lookup(RUN_SHELL_COMMAND).unwrap();
        let err = tool.invoke(&Map::new()).unwrap_err();
        assert!(matches!(err, ShellMcpError::InvalidArguments { .. }));
        assert!(err.to_string().contains("shellCommand"));
    }

    #[test]
    fn non_string_argument_is_invalid() {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.lookup(EXECUTE_SHELL_COMMAND).unwrap();
        let mut map = Map::new();
        map.insert("shellCommand".into(), json!(42));
        assert!(matches!(
            tool.invoke(&map).unwrap_err(),
            ShellMcpError::InvalidArguments { .. }
        ));
    }

    #[test]
    fn only_echo_tool_carries_ui_meta() {
        let registry = ToolRegistry::builtin().unwrap();
        let echo = registry.lookup(RUN_SHELL_COMMAND).unwrap();
        let meta = echo.meta.as_ref().unwrap();
        assert_eq!(meta[RESOURCE_URI_META_KEY], json!(RUN_SHELL_COMMAND_URI));

        let exec = registry.lookup(EXECUTE_SHELL_COMMAND).unwrap();
        assert!(exec.meta.is_none());
    }

    #[test]
    fn descriptor_serializes_in_listing_shape() {
        let registry = ToolRegistry::builtin().unwrap();
        let value = serde_json::to_value(registry.lookup(RUN_SHELL_COMMAND).unwrap()).unwrap();

        assert_eq!(value["name"], json!(RUN_SHELL_COMMAND));
        assert_eq!(value["title"], json!("Run Shell Command"));
        assert_eq!(value["_meta"]["ui/resourceUri"], json!(RUN_SHELL_COMMAND_URI));
        assert_eq!(value["inputSchema"]["type"], json!("object"));
        assert_eq!(value["inputSchema"]["required"], json!(["shellCommand"]));
        assert_eq!(
            value["inputSchema"]["properties"]["shellCommand"]["type"],
            json!("string")
        );
        assert!(value.get("handler").is_none());
    }

    #[test]
    fn input_schema_hides_rust_type_details() {
        let registry = ToolRegistry::builtin().unwrap();
        for tool in registry.list() {
            assert!(tool.input_schema.get("title").is_none(), "{}", tool.name);
            assert!(tool.input_schema.get("description").is_none(), "{}", tool.name);
            assert_eq!(
                tool.input_schema["properties"]["shellCommand"]["description"],
                json!("The command to execute")
            );
        }
    }

    #[test]
    fn registration_from_empty_keeps_order() {
        let mut registry = ToolRegistry::new();
        assert!(registry.list().is_empty());
        registry
            .register(ToolDescriptor::new(EXECUTE_SHELL_COMMAND, ToolHandler::Execute))
            .unwrap();
        registry
            .register(ToolDescriptor::new(RUN_SHELL_COMMAND, ToolHandler::Echo))
            .unwrap();
        let names: Vec<&str> = registry.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![EXECUTE_SHELL_COMMAND, RUN_SHELL_COMMAND]);
    }

    #[cfg(unix)]
    #[test]
    fn execute_runs_command() {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.lookup(EXECUTE_SHELL_COMMAND).unwrap();
        assert_eq!(tool.invoke(&args("echo from-tool")).unwrap(), "from-tool\n");
    }
}
