//! Error types for probing and leveling.
//!
//! Data-quality conditions that the run can survive (near-duplicate probe
//! coordinates, malformed probe-log records) are logged as warnings, not
//! raised as errors. Everything here is fatal for the current run.

use thiserror::Error;

/// Errors that can occur while reading probe data or building the grid.
#[derive(Error, Debug)]
pub enum GridError {
    /// No probe sample matched a grid intersection.
    ///
    /// An incomplete lattice would silently poison every interpolation that
    /// touches the hole, so construction fails instead.
    #[error("Missing probe sample at ({x:.3}, {y:.3})")]
    MissingSample {
        /// Work-coordinate X of the empty cell.
        x: f64,
        /// Work-coordinate Y of the empty cell.
        y: f64,
    },

    /// Bilinear interpolation needs at least a 2x2 lattice.
    #[error("Probe data spans {xcount} X and {ycount} Y positions; need at least 2 of each")]
    InsufficientCoverage {
        /// Distinct probed X positions.
        xcount: usize,
        /// Distinct probed Y positions.
        ycount: usize,
    },

    /// The probe log contained no `[PRB:` records at all.
    #[error("No probe records found in the log")]
    NoProbeRecords,

    /// I/O error while reading the probe log or writing the plot script.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for probing and leveling operations.
pub type GridResult<T> = Result<T, GridError>;
