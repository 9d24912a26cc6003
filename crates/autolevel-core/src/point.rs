//! Shared 3-D point type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in 3-dimensional Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis coordinate
    pub x: f64,
    /// Y-axis coordinate
    pub y: f64,
    /// Z-axis coordinate
    pub z: f64,
}

impl Point3 {
    /// The origin.
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// This point expressed relative to `origin` (component-wise subtraction).
    pub fn relative_to(&self, origin: &Point3) -> Point3 {
        Point3::new(self.x - origin.x, self.y - origin.y, self.z - origin.z)
    }

    /// Lower this point to the component-wise minimum with the given coordinates.
    pub fn min_with(&mut self, x: f64, y: f64, z: f64) {
        self.x = self.x.min(x);
        self.y = self.y.min(y);
        self.z = self.z.min(z);
    }

    /// Raise this point to the component-wise maximum with the given coordinates.
    pub fn max_with(&mut self, x: f64, y: f64, z: f64) {
        self.x = self.x.max(x);
        self.y = self.y.max(y);
        self.z = self.z.max(z);
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3},{:.3},{:.3})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to() {
        let p = Point3::new(10.0, 5.0, -2.0);
        let origin = Point3::new(-272.5, -152.0, 0.0);
        let rel = p.relative_to(&origin);
        assert_eq!(rel, Point3::new(282.5, 157.0, -2.0));
    }

    #[test]
    fn test_extent_accumulation() {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y, z) in [(1.0, -1.0, 5.0), (-3.0, 2.0, 0.5)] {
            min.min_with(x, y, z);
            max.max_with(x, y, z);
        }
        assert_eq!(min, Point3::new(-3.0, -1.0, 0.5));
        assert_eq!(max, Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Point3::new(1.0, -0.25, 20.966).to_string(),
            "(1.000,-0.250,20.966)"
        );
    }
}
