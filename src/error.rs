use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellMcpError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool already registered: {0}")]
    DuplicateTool(String),

    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("failed to spawn `{command}`: {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("command `{command}` exited with {}: {stderr}", exit_label(.status))]
    CommandExecution {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("cannot read resource {uri} at {path}: {source}")]
    ResourceRead {
        uri: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".into(),
    }
}

pub type Result<T> = std::result::Result<T, ShellMcpError>;
