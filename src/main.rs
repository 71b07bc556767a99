use clap::Parser;

mod cli;
mod mcp;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    cli::logging::init(args.verbose, args.quiet)?;

    let config = args.effective_config()?;

    match args.command {
        Some(ref command) => cli::run(command, &config)?,
        None => mcp::serve(args.transport(&config), &config)?,
    }

    Ok(())
}
