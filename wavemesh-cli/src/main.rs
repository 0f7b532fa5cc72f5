/// wavemesh - text geometry to binary mesh converter
///
/// Usage: wavemesh -f <input> [-o <output>] [-v]

use anyhow::Context;
use clap::Parser;
use wavemesh_cli::{run, Args, ConvertConfig};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let config = ConvertConfig::resolve(&args, &cwd)?;

    run(&config)?;

    log::info!("Successfully parsed \"{}\"", config.input.display());
    log::info!("Wrote to \"{}\"", config.output.display());
    Ok(())
}
