//! Probe grid construction and bilinear height interpolation.

use autolevel_core::Point3;
use tracing::{debug, info, warn};

use crate::error::{GridError, GridResult};

/// Two adjacent grid coordinates closer than this are reported as near
/// duplicates. Probing never uses a finer pitch; values this close are almost
/// certainly the same physical position with floating-point round-off.
const NEAR_DUPLICATE_TOLERANCE: f64 = 0.01;

/// A rectangular lattice of probed surface heights.
///
/// `zmatrix[j][i]` is the measured height at `(xgrid[i], ygrid[j])`. The grid
/// is built once from the full probe sample set and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct ProbeGrid {
    xgrid: Vec<f64>,
    ygrid: Vec<f64>,
    zmatrix: Vec<Vec<f64>>,
}

impl ProbeGrid {
    /// Build a grid from raw machine-coordinate probe samples.
    ///
    /// Samples are first offset by `work_offset` into work coordinates. The
    /// distinct X and Y values (exact float equality) become the ascending
    /// grid axes; every `(x, y)` intersection must be covered by exactly one
    /// sample. Heights are then normalized so the interpolated height at the
    /// work origin `(0, 0)` is exactly zero, making every later query a
    /// deviation relative to the origin.
    pub fn build(samples: &[Point3], work_offset: Point3) -> GridResult<ProbeGrid> {
        info!("Creating probe grid from {} samples", samples.len());
        debug!("Offsetting probe samples by {}", work_offset);
        let probes: Vec<Point3> = samples
            .iter()
            .map(|p| p.relative_to(&work_offset))
            .collect();

        let xgrid = unique_sorted(probes.iter().map(|p| p.x));
        let ygrid = unique_sorted(probes.iter().map(|p| p.y));
        if xgrid.len() < 2 || ygrid.len() < 2 {
            return Err(GridError::InsufficientCoverage {
                xcount: xgrid.len(),
                ycount: ygrid.len(),
            });
        }
        check_near_duplicates(&xgrid, "X");
        check_near_duplicates(&ygrid, "Y");

        let mut zmatrix = vec![vec![0.0; xgrid.len()]; ygrid.len()];
        for (j, &y) in ygrid.iter().enumerate() {
            for (i, &x) in xgrid.iter().enumerate() {
                let z = probes
                    .iter()
                    .find(|p| p.x == x && p.y == y)
                    .map(|p| p.z)
                    .ok_or(GridError::MissingSample { x, y })?;
                zmatrix[j][i] = z;
            }
        }

        let mut grid = ProbeGrid {
            xgrid,
            ygrid,
            zmatrix,
        };

        // Re-express all heights relative to the work origin.
        let z0 = grid.height(0.0, 0.0);
        info!("Height at origin before normalization: {:.3}", z0);
        for row in &mut grid.zmatrix {
            for z in row {
                *z -= z0;
            }
        }

        grid.log_extents();
        info!("Probe grid complete");
        Ok(grid)
    }

    /// Assemble a grid from already-offset, already-normalized parts.
    ///
    /// `zmatrix` must have one row per Y value and one column per X value,
    /// and both axes must be ascending with at least two entries.
    pub fn from_parts(
        xgrid: Vec<f64>,
        ygrid: Vec<f64>,
        zmatrix: Vec<Vec<f64>>,
    ) -> GridResult<ProbeGrid> {
        if xgrid.len() < 2 || ygrid.len() < 2 {
            return Err(GridError::InsufficientCoverage {
                xcount: xgrid.len(),
                ycount: ygrid.len(),
            });
        }
        for (j, row) in zmatrix.iter().enumerate() {
            if row.len() != xgrid.len() {
                return Err(GridError::MissingSample {
                    x: xgrid[row.len().min(xgrid.len() - 1)],
                    y: ygrid[j],
                });
            }
        }
        if zmatrix.len() != ygrid.len() {
            return Err(GridError::MissingSample {
                x: xgrid[0],
                y: ygrid[zmatrix.len().min(ygrid.len() - 1)],
            });
        }
        Ok(ProbeGrid {
            xgrid,
            ygrid,
            zmatrix,
        })
    }

    /// Interpolated surface height at `(x, y)` in work coordinates.
    ///
    /// Bilinear: interpolate in Y at the two bracketing grid columns, then in
    /// X between those results. (Interpolating X first is algebraically
    /// equivalent; only the rounding of intermediate terms differs.) Indices
    /// are clamped to the grid, so queries beyond the probed envelope
    /// extrapolate from the outermost cell instead of failing.
    pub fn height(&self, x: f64, y: f64) -> f64 {
        let i = grid_index(&self.xgrid, x);
        let j = grid_index(&self.ygrid, y);

        let y_ratio = (y - self.ygrid[j]) / (self.ygrid[j + 1] - self.ygrid[j]);
        let z_left = lerp(self.zmatrix[j][i], self.zmatrix[j + 1][i], y_ratio);
        let z_right = lerp(self.zmatrix[j][i + 1], self.zmatrix[j + 1][i + 1], y_ratio);

        let x_ratio = (x - self.xgrid[i]) / (self.xgrid[i + 1] - self.xgrid[i]);
        lerp(z_left, z_right, x_ratio)
    }

    /// The ascending distinct probed X positions.
    pub fn xgrid(&self) -> &[f64] {
        &self.xgrid
    }

    /// The ascending distinct probed Y positions.
    pub fn ygrid(&self) -> &[f64] {
        &self.ygrid
    }

    /// The height matrix, indexed `[y][x]`.
    pub fn zmatrix(&self) -> &[Vec<f64>] {
        &self.zmatrix
    }

    fn log_extents(&self) {
        let mut min_z = f64::INFINITY;
        let mut max_z = f64::NEG_INFINITY;
        for row in &self.zmatrix {
            for &z in row {
                min_z = min_z.min(z);
                max_z = max_z.max(z);
            }
        }
        info!("X grid size: {}", self.xgrid.len());
        info!("Y grid size: {}", self.ygrid.len());
        info!(
            "Min height: {}",
            Point3::new(self.xgrid[0], self.ygrid[0], min_z)
        );
        info!(
            "Max height: {}",
            Point3::new(
                self.xgrid[self.xgrid.len() - 1],
                self.ygrid[self.ygrid.len() - 1],
                max_z
            )
        );
    }
}

/// Linear interpolation between `a` and `b` at ratio `t`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Lower corner of the grid cell bracketing `v`: the first interval
/// `[grid[i], grid[i+1]]` whose upper bound is at or above `v`, clamped so
/// that both `i` and `i + 1` are always valid indices. Values outside the
/// grid clamp to the outermost cell.
fn grid_index(grid: &[f64], v: f64) -> usize {
    for i in 1..grid.len() {
        if v <= grid[i] {
            return i - 1;
        }
    }
    grid.len() - 2
}

/// The distinct values of an unordered sequence, ascending.
fn unique_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    values
}

/// Warn about adjacent grid values that are suspiciously close. Probe logs
/// report rounded floats, so 15.0 and 14.999999999 can both appear for one
/// physical position.
fn check_near_duplicates(grid: &[f64], axis: &str) {
    for pair in grid.windows(2) {
        if pair[1] - pair[0] < NEAR_DUPLICATE_TOLERANCE {
            warn!(
                "Near duplicate {}-axis probe values: {:.6}, {:.6}",
                axis, pair[0], pair[1]
            );
        }
    }
}
