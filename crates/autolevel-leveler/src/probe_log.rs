//! GRBL probe-log reader.
//!
//! Extracts probe records from a controller console log saved to a file.
//! A record looks like `[PRB:-262.500,-150.000,-20.966:1]`: three
//! comma-separated machine coordinates between the colons, then a success
//! flag. Every other line in the log is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use autolevel_core::Point3;
use tracing::{info, warn};

use crate::error::{GridError, GridResult};

/// Read the probe records from a log file, in file order.
///
/// Lines that start like a probe record but do not parse are logged as
/// warnings and skipped; an entirely record-free log is an error.
pub fn read(path: impl AsRef<Path>) -> GridResult<Vec<Point3>> {
    let path = path.as_ref();
    info!("Opening: {}", path.display());

    let reader = BufReader::new(File::open(path)?);
    let mut probes = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(rest) = line.strip_prefix("[PRB:") {
            match parse_record(rest) {
                Some(probe) => probes.push(probe),
                None => warn!("Skipping malformed probe record: {}", line),
            }
        }
    }

    info!("Read {} probe points", probes.len());
    if probes.is_empty() {
        return Err(GridError::NoProbeRecords);
    }
    Ok(probes)
}

/// Parse the remainder of a `[PRB:` line into a point.
fn parse_record(rest: &str) -> Option<Point3> {
    let coordinates = rest.split(':').next()?;
    let mut values = coordinates.split(',');
    let x = values.next()?.trim().parse().ok()?;
    let y = values.next()?.trim().parse().ok()?;
    let z = values.next()?.trim().parse().ok()?;
    if values.next().is_some() {
        return None;
    }
    Some(Point3::new(x, y, z))
}
