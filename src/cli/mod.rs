pub mod commands;
pub mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shell_mcp::config;
use shell_mcp::config::types::ServerConfig;

#[derive(Parser)]
#[command(
    name = "shell-mcp",
    about = "MCP server exposing shell tools and UI resources.",
    version
)]
pub struct Cli {
    /// Serve MCP over stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,

    /// Bind address for HTTP mode (overrides HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Bind port for HTTP mode (overrides PORT)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Directory holding UI resource files (overrides UI_RESOURCES_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub ui_resources_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}

/// How the server talks to its peer. Chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http { host: String, port: u16 },
}

impl Cli {
    /// Environment config with CLI flags layered on top.
    pub fn effective_config(&self) -> anyhow::Result<ServerConfig> {
        Ok(self.apply_overrides(config::load_config()?))
    }

    pub fn apply_overrides(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref dir) = self.ui_resources_dir {
            config.ui_resources_dir = dir.clone();
        }
        config
    }

    pub fn transport(&self, config: &ServerConfig) -> Transport {
        if self.stdio {
            Transport::Stdio
        } else {
            Transport::Http {
                host: config.host.clone(),
                port: config.port,
            }
        }
    }
}

/// Dispatch a CLI subcommand.
pub fn run(command: &Commands, config: &ServerConfig) -> anyhow::Result<()> {
    match command {
        Commands::Config(args) => commands::config::run(config, args.format),
    }
}
