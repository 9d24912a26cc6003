//! # Autolevel
//!
//! A G-code post-processor that compensates for an uneven work surface
//! measured by touch-probing:
//! - Reads probe records from a controller console log
//! - Builds a rectangular height grid and interpolates between samples
//! - Rewrites programmed Z coordinates so cut depth stays consistent
//!
//! ## Architecture
//!
//! Autolevel is organized as a workspace:
//!
//! 1. **autolevel-core** - G-code model, tokenizer, modal state, program I/O
//! 2. **autolevel-leveler** - probe log reader, probe grid, leveling pass
//! 3. **autolevel** - the command-line binary that wires the pipeline
//!
//! The pipeline is strictly sequential: probe log → grid → parse → level →
//! write. Later lines depend on the accumulated modal state of all earlier
//! lines, so no reordering or parallel processing is possible.

pub mod config;

pub use autolevel_core::{
    format_value, tokenize, Axis, Block, CodeWord, GcodeError, Group, Mode, ParseError, Point3,
    Program, ProgramLine, State,
};
pub use autolevel_leveler::{level, GridError, LevelStats, ProbeGrid};

/// Initialize logging for the application.
///
/// Console output, filtered through `RUST_LOG` with an INFO default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
