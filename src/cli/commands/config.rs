use std::io::Write;

use shell_mcp::config::types::ServerConfig;

#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub fn run(config: &ServerConfig, format: ConfigFormat) -> anyhow::Result<()> {
    write_config(config, format, &mut std::io::stdout().lock())
}

pub fn write_config(
    config: &ServerConfig,
    format: ConfigFormat,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        ConfigFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, config)?;
            writeln!(writer)?;
        }
        ConfigFormat::Toml => {
            write!(writer, "{}", toml::to_string_pretty(config)?)?;
        }
    }
    Ok(())
}
