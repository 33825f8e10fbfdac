//! Main entry point for the Parlance command-line host.

use anyhow::Context;
use clap::Parser;
use parlance::{init_logging, load_config, run, Args};
use parlance_i18n::Registry;
use tracing::{debug, error};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!("Running {:?}", args.command);

    let registry = Registry::new(&config.i18n).context("Failed to create locale registry")?;
    match run(&registry, &args.command) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e.into())
        }
    }
}
