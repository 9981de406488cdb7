mod args;

use anyhow::{Context, Result};
use clap::Parser;
use pythoscope_log::logging::{self, LoggingConfig, Output};

use crate::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(LoggingConfig { level: cli.level(), ..LoggingConfig::default() })
        .context("failed to install logger")?;

    log::info!("inspecting project");
    log::debug!("level is {}", logging::level());

    if let Some(path) = &cli.output {
        let file = Output::file(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        log::info!("redirecting log to {}", path.display());
        let previous = logging::get_output();
        logging::set_output(file);
        log::info!("collected 3 modules");
        log::debug!("generator.adder: 12 tests generated");
        logging::set_output(previous);
    }

    log::error!("could not parse {}", "broken.py");
    log::info!("done");
    Ok(())
}
