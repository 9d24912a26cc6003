//! The leveling pass: rewrites programmed Z by the probed surface height.

use autolevel_core::{Axis, Group, Point3, ProgramLine, State};
use tracing::info;

use crate::grid::ProbeGrid;

/// Summary of one leveling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    /// Number of lines whose Z was adjusted.
    pub adjusted: usize,
    /// Component-wise minimum of the adjusted (x, y, z) positions.
    pub min: Point3,
    /// Component-wise maximum of the adjusted (x, y, z) positions.
    pub max: Point3,
}

/// Adjust the programmed Z of every motion line by the interpolated surface
/// height at its (X, Y) position.
///
/// Folds a running global state over the lines in source order. After a line
/// is merged: if the global state has a motion mode and an established Z, and
/// the line itself sets X, Y, or Z, and the merged global X, Y, Z are all
/// present, the line's Z becomes `global Z + height(global X, global Y)`.
///
/// The running global state keeps the *programmed* Z; the adjustment is
/// written only into the per-line state. Each line is therefore corrected
/// relative to the coordinates the program asked for, and corrections never
/// compound across lines.
pub fn level(lines: &mut [ProgramLine], grid: &ProbeGrid) -> LevelStats {
    info!("Leveling {} lines", lines.len());

    let mut global = State::new();
    let mut stats = LevelStats {
        adjusted: 0,
        min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    for line in lines.iter_mut() {
        global.merge_from(&line.state);

        if global.group(Group::Motion).is_none() || global.axis(Axis::Z).is_none() {
            continue;
        }
        if !line.state.sets_any(&[Axis::X, Axis::Y, Axis::Z]) {
            continue;
        }
        let (Some(x), Some(y), Some(z)) = (
            global.axis(Axis::X),
            global.axis(Axis::Y),
            global.axis(Axis::Z),
        ) else {
            continue;
        };

        let adjusted = z + grid.height(x, y);
        line.state.set_axis(Axis::Z, adjusted);

        stats.adjusted += 1;
        stats.min.min_with(x, y, adjusted);
        stats.max.max_with(x, y, adjusted);
    }

    info!("{} lines adjusted", stats.adjusted);
    if stats.adjusted > 0 {
        info!("Adjusted extent min: {}", stats.min);
        info!("Adjusted extent max: {}", stats.max);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolevel_core::Program;

    /// Grid whose corners give height(0,0) = 0.2 and height(10,10) = -0.1.
    fn test_grid() -> ProbeGrid {
        ProbeGrid::from_parts(
            vec![0.0, 10.0],
            vec![0.0, 10.0],
            vec![vec![0.2, 0.0], vec![0.0, -0.1]],
        )
        .unwrap()
    }

    #[test]
    fn test_leveling_adjusts_stated_and_inherited_z() {
        let mut program = Program::parse("G1\nX0 Y0 Z5\nX10 Y10\n").unwrap();
        let stats = level(&mut program.lines, &test_grid());

        assert_eq!(stats.adjusted, 2);
        assert_eq!(program.lines[1].state.axis(Axis::Z), Some(5.2));
        // Z is not re-stated; the correction applies to the programmed Z.
        assert_eq!(program.lines[2].state.axis(Axis::Z), Some(4.9));
    }

    #[test]
    fn test_lines_before_motion_pass_through() {
        let mut program = Program::parse("X1 Y1 Z1\nG21\nG1\n").unwrap();
        let stats = level(&mut program.lines, &test_grid());

        assert_eq!(stats.adjusted, 0);
        assert_eq!(program.lines[0].state.axis(Axis::Z), Some(1.0));
    }

    #[test]
    fn test_lines_without_coordinates_pass_through() {
        let mut program = Program::parse("G1 X0 Y0 Z5\nM3 S10000\nF250\n").unwrap();
        let stats = level(&mut program.lines, &test_grid());

        // Only the first line touches X/Y/Z.
        assert_eq!(stats.adjusted, 1);
        assert_eq!(program.lines[0].state.axis(Axis::Z), Some(5.2));
        assert_eq!(program.lines[2].state.axis(Axis::Z), None);
    }

    #[test]
    fn test_no_adjustment_until_xy_established() {
        let mut program = Program::parse("G1 Z5\nX0\nY0\n").unwrap();
        let stats = level(&mut program.lines, &test_grid());

        // Line 1 and 2 lack a full (X, Y, Z); only line 3 adjusts.
        assert_eq!(stats.adjusted, 1);
        assert_eq!(program.lines[0].state.axis(Axis::Z), Some(5.0));
        assert_eq!(program.lines[2].state.axis(Axis::Z), Some(5.2));
    }

    #[test]
    fn test_stats_track_extents() {
        let mut program = Program::parse("G1\nX0 Y0 Z5\nX10 Y10\n").unwrap();
        let stats = level(&mut program.lines, &test_grid());

        assert_eq!(stats.min, Point3::new(0.0, 0.0, 4.9));
        assert_eq!(stats.max, Point3::new(10.0, 10.0, 5.2));
    }
}
