#[cfg(test)]
#[path = "circle_test.rs"]
mod circle_test;

use crate::consts::{DEFAULT_CIRCLE_RADIUS, MIN_RADIUS};
use crate::geom::Point;
use crate::input::PointerEvent;

/// Circle geometry. The handle sits on the perimeter at `center + (radius, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    /// Touch resizing never goes below this.
    pub(crate) min_radius: f64,
}

impl Default for Circle {
    fn default() -> Self {
        Self::sized(1.0)
    }
}

impl Circle {
    #[must_use]
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius, min_radius: MIN_RADIUS }
    }

    /// A fresh circle with the default radius and floor scaled by `density`.
    #[must_use]
    pub fn sized(density: f64) -> Self {
        Self {
            center: Point::default(),
            radius: DEFAULT_CIRCLE_RADIUS * density,
            min_radius: MIN_RADIUS * density,
        }
    }

    #[must_use]
    pub fn handle(&self) -> Point {
        Point::new(self.center.x + self.radius, self.center.y)
    }

    /// Grow or shrink the radius by the horizontal motion of `ev`.
    ///
    /// Motion away from the center grows the circle on either side of it.
    pub fn drag_radius(&mut self, ev: &PointerEvent) {
        let dx = ev.delta().x;
        let dr = if ev.pos.x >= self.center.x { dx } else { -dx };
        self.radius = (self.radius + dr).max(self.min_radius);
    }

    pub fn translate_by(&mut self, delta: Point) {
        self.center = self.center.offset(delta);
    }

    pub fn rescale(&mut self, factor: f64) {
        self.radius *= factor;
    }
}
