//! # Autolevel Leveler
//!
//! The probing domain for the autolevel post-processor:
//! - GRBL probe-log reader (`[PRB:...]` records)
//! - Probe grid construction and bilinear height interpolation
//! - The leveling pass that rewrites programmed Z coordinates
//! - Plot-script generation for inspecting the probed surface

pub mod error;
pub mod grid;
pub mod leveler;
pub mod plot;
pub mod probe_log;

pub use error::GridError;
pub use grid::ProbeGrid;
pub use leveler::{level, LevelStats};
