//! Work-coordinate configuration.
//!
//! The controller reports probe positions in machine coordinates; the offset
//! here translates them into the work coordinate system the program runs in.
//! It should be taken from the controller's WCS settings (G54..G59), e.g.
//! `[G54:-278.000,-155.000,-1.000]`. The offset is fixed for a run: it is
//! configuration, never derived from the input files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use autolevel_core::Point3;
use serde::{Deserialize, Serialize};

/// Tool configuration, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Offset subtracted from every raw probe sample (machine to work
    /// coordinates).
    pub probe_offset: Point3,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_offset: Point3::new(-272.5, -152.0, 0.0),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
