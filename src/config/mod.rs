pub mod types;

use std::path::PathBuf;

use crate::error::{Result, ShellMcpError};
use types::ServerConfig;

pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const UI_RESOURCES_DIR_VAR: &str = "UI_RESOURCES_DIR";

/// Load config from the process environment, falling back to defaults.
pub fn load_config() -> Result<ServerConfig> {
    load_from(|key| std::env::var(key).ok())
}

/// Load config through an arbitrary variable lookup. Empty values count as unset.
pub fn load_from<F>(lookup: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = ServerConfig::default();

    if let Some(host) = get(HOST_VAR) {
        config.host = host.trim().to_string();
    }
    if let Some(port) = get(PORT_VAR) {
        config.port = port
            .trim()
            .parse()
            .map_err(|e| ShellMcpError::Config(format!("{PORT_VAR}={port:?}: {e}")))?;
    }
    if let Some(dir) = get(UI_RESOURCES_DIR_VAR) {
        config.ui_resources_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Built UI fragments live in `dist/` at the package root.
pub fn default_resources_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("dist")
}
