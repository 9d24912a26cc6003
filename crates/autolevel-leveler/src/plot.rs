//! Plot-script generation for the probed surface.
//!
//! Emits a standalone Python/matplotlib script that renders the interpolated
//! surface over the probed envelope, with the raw probe lattice drawn on top
//! as a wireframe. Useful for sanity-checking a probe run before committing
//! to a cut.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::GridResult;
use crate::grid::ProbeGrid;

/// Write a matplotlib surface-plot script for the grid.
pub fn write_script(path: impl AsRef<Path>, grid: &ProbeGrid) -> GridResult<()> {
    let path = path.as_ref();
    info!("Creating plot script: {}", path.display());

    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "import numpy as np")?;
    writeln!(out, "import matplotlib.pyplot as plt")?;
    writeln!(out, "from matplotlib import cm")?;
    writeln!(out)?;

    // Interpolated surface, sampled on a unit lattice across the envelope.
    let x0 = grid.xgrid()[0].floor() as i64;
    let x1 = grid.xgrid()[grid.xgrid().len() - 1].ceil() as i64;
    let y0 = grid.ygrid()[0].floor() as i64;
    let y1 = grid.ygrid()[grid.ygrid().len() - 1].ceil() as i64;

    writeln!(out, "x = [")?;
    for _ in y0..=y1 {
        writeln!(out, "[{}],", join((x0..=x1).map(|x| x.to_string())))?;
    }
    writeln!(out, "]")?;

    writeln!(out, "y = [")?;
    for y in y0..=y1 {
        writeln!(out, "[{}],", join((x0..=x1).map(|_| y.to_string())))?;
    }
    writeln!(out, "]")?;

    writeln!(out, "z = [")?;
    for y in y0..=y1 {
        let row = (x0..=x1).map(|x| format!("{:.3}", grid.height(x as f64, y as f64)));
        writeln!(out, "[{}],", join(row))?;
    }
    writeln!(out, "]")?;

    writeln!(out, "# Plot the surface.")?;
    writeln!(out, "X = np.array(x)")?;
    writeln!(out, "Y = np.array(y)")?;
    writeln!(out, "Z = np.array(z)")?;
    writeln!(out, "fig = plt.figure()")?;
    writeln!(out, "ax = fig.add_subplot(projection='3d')")?;
    writeln!(
        out,
        "surf = ax.plot_surface(X, Y, Z, rstride=1, cstride=1, cmap=cm.coolwarm)"
    )?;
    writeln!(out, "fig.colorbar(surf, shrink=0.5, aspect=5)")?;

    // Probe lattice: one polyline per grid row and per grid column.
    writeln!(out, "# Probe lattice")?;
    for (j, &y) in grid.ygrid().iter().enumerate() {
        let xs = join(grid.xgrid().iter().map(|x| format!("{:.3}", x)));
        let ys = join(grid.xgrid().iter().map(|_| format!("{:.3}", y)));
        let zs = join(grid.zmatrix()[j].iter().map(|z| format!("{:.3}", z)));
        writeln!(out, "ax.plot([{}], [{}], [{}], linewidth=2, color='black')", xs, ys, zs)?;
    }
    for (i, &x) in grid.xgrid().iter().enumerate() {
        let xs = join(grid.ygrid().iter().map(|_| format!("{:.3}", x)));
        let ys = join(grid.ygrid().iter().map(|y| format!("{:.3}", y)));
        let zs = join(grid.zmatrix().iter().map(|row| format!("{:.3}", row[i])));
        writeln!(out, "ax.plot([{}], [{}], [{}], linewidth=2, color='black')", xs, ys, zs)?;
    }

    writeln!(out, "plt.show()")?;
    out.flush()?;

    info!("Plot script complete");
    Ok(())
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}
