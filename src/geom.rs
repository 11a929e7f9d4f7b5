#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A position or displacement on the painting surface.
///
/// Coordinates are y-up: positive `y` points towards the top of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Component-wise sum.
    #[must_use]
    pub fn offset(self, delta: Point) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y }
    }

    /// Displacement that carries `from` onto `self`.
    #[must_use]
    pub fn delta_from(self, from: Point) -> Self {
        Self { x: self.x - from.x, y: self.y - from.y }
    }

    /// Whether both coordinates fall in the same integer cell as `other`.
    #[must_use]
    pub fn same_cell(self, other: Point) -> bool {
        (self.x.floor() - other.x.floor()).abs() < 0.5 && (self.y.floor() - other.y.floor()).abs() < 0.5
    }
}

/// Point at distance `radius` from `center`, at `angle` radians counter-clockwise from +x.
#[must_use]
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Average of `points`, or `None` when empty.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Index and distance of the point in `points` nearest to `target`.
#[must_use]
pub fn nearest(points: &[Point], target: Point) -> Option<(usize, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance(target)))
        .fold(None, |best, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
}
