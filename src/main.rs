use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use autolevel::config::Config;
use autolevel_core::Program;
use autolevel_leveler::{level, plot, probe_log, ProbeGrid};

/// Level a G-code program against touch-probe surface measurements.
#[derive(Parser, Debug)]
#[command(
    name = "autolevel",
    version,
    about = "Rewrites programmed Z coordinates to follow a probed work surface"
)]
struct Cli {
    /// G-code program to level.
    gcode: PathBuf,

    /// Probe log saved from the controller console.
    #[arg(long, short)]
    probes: PathBuf,

    /// Output path for the leveled program.
    #[arg(long, short)]
    output: PathBuf,

    /// TOML configuration with the work-coordinate offset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write a matplotlib script visualizing the probe grid.
    #[arg(long)]
    plot: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = autolevel::init_logging() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!(
        "autolevel {} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let probes = probe_log::read(&cli.probes)?;
    let grid = ProbeGrid::build(&probes, config.probe_offset)?;

    if let Some(path) = &cli.plot {
        plot::write_script(path, &grid)?;
    }

    let mut program = Program::read(&cli.gcode)?;
    level(&mut program.lines, &grid);
    program.write(&cli.output)?;

    info!("Done");
    Ok(())
}
