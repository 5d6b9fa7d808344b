use anyhow::Result;
use clap::Parser;
use toolhub::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    toolhub::run(cli)?;
    Ok(())
}
