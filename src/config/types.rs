use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Effective server configuration after env and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for network-server mode.
    pub host: String,
    /// Bind port for network-server mode.
    pub port: u16,
    /// Directory searched for UI resource files.
    pub ui_resources_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            ui_resources_dir: super::default_resources_dir(),
        }
    }
}
