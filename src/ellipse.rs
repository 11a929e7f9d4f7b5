#[cfg(test)]
#[path = "ellipse_test.rs"]
mod ellipse_test;

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::consts::{DEFAULT_ELLIPSE_RADIUS_X, DEFAULT_ELLIPSE_RADIUS_Y, MIN_RADIUS};
use crate::geom::{Point, polar};
use crate::input::PointerEvent;

/// Which radius of an ellipse a drag edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Ellipse geometry, rotated counter-clockwise by `angle` radians about its center.
///
/// It has two handles, one at the end of each rotated axis. The x-axis handle
/// doubles as the drag handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub angle: f64,
    pub(crate) min_radius: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::sized(1.0)
    }
}

impl Ellipse {
    #[must_use]
    pub fn new(center: Point, radius_x: f64, radius_y: f64, angle: f64) -> Self {
        Self { center, radius_x, radius_y, angle, min_radius: MIN_RADIUS }
    }

    /// A fresh upright ellipse with default radii and floor scaled by `density`.
    #[must_use]
    pub fn sized(density: f64) -> Self {
        Self {
            center: Point::default(),
            radius_x: DEFAULT_ELLIPSE_RADIUS_X * density,
            radius_y: DEFAULT_ELLIPSE_RADIUS_Y * density,
            angle: 0.0,
            min_radius: MIN_RADIUS * density,
        }
    }

    /// End of the rotated x-axis; the drag handle.
    #[must_use]
    pub fn handle_x(&self) -> Point {
        polar(self.center, self.radius_x, self.angle)
    }

    /// End of the rotated y-axis.
    #[must_use]
    pub fn handle_y(&self) -> Point {
        polar(self.center, self.radius_y, self.angle + FRAC_PI_2)
    }

    /// Distances from `p` to the x-axis and y-axis handles.
    #[must_use]
    pub fn handle_distances(&self, p: Point) -> (f64, f64) {
        (self.handle_x().distance(p), self.handle_y().distance(p))
    }

    /// The axis whose handle is closest to `p`; ties go to x.
    #[must_use]
    pub fn closer_axis(&self, p: Point) -> Axis {
        let (dx, dy) = self.handle_distances(p);
        if dx <= dy { Axis::X } else { Axis::Y }
    }

    /// Resize the closer axis and rotate by the angular motion of `ev` about the center.
    ///
    /// Motion whose projection onto the axis falls within the minimum radius of the
    /// center (or behind it) is ignored, since the rotation there is unstable.
    pub fn drag(&mut self, ev: &PointerEvent) -> bool {
        let axis = self.closer_axis(ev.pos);
        let axis_angle = match axis {
            Axis::X => self.angle,
            Axis::Y => self.angle + FRAC_PI_2,
        };
        let (ux, uy) = (axis_angle.cos(), axis_angle.sin());

        let prev = ev.prev.delta_from(self.center);
        let cur = ev.pos.delta_from(self.center);
        let prev_r = prev.x * ux + prev.y * uy;
        let r = cur.x * ux + cur.y * uy;
        let floor = self.min_radius;
        if r <= floor || prev_r <= floor {
            return false;
        }

        let turn = cur.y.atan2(cur.x) - prev.y.atan2(prev.x);
        self.angle = (self.angle + turn).rem_euclid(TAU);

        let radius = match axis {
            Axis::X => &mut self.radius_x,
            Axis::Y => &mut self.radius_y,
        };
        *radius = (*radius + r - prev_r).max(floor);
        true
    }

    pub fn translate_by(&mut self, delta: Point) {
        self.center = self.center.offset(delta);
    }

    pub fn rescale(&mut self, factor: f64) {
        self.radius_x *= factor;
        self.radius_y *= factor;
    }
}
