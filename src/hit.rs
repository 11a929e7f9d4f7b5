//! Hit-testing of pointer positions against shape handles and editable points.
//!
//! Both searches walk the shapes top-down (last in z-order first), skip
//! locked shapes, and only accept points strictly closer than the threshold.
//! Among equally close candidates the upper shape wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::Point;
use crate::shape::{Shape, ShapeId};

/// Which kind of point on a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The single drag/select handle.
    Handle,
    /// Any point an edit gesture can grab.
    InteractionPoint,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
    pub distance: f64,
}

/// The shape whose handle is nearest `pt`, within `max_dist`.
#[must_use]
pub fn closest_handle(shapes: &[Shape], pt: Point, max_dist: f64) -> Option<Hit> {
    closest(shapes, pt, max_dist, HitPart::Handle, Shape::closest_handle_distance)
}

/// The shape with an editable point nearest `pt`, within `max_dist`.
#[must_use]
pub fn closest_interaction(shapes: &[Shape], pt: Point, max_dist: f64) -> Option<Hit> {
    closest(shapes, pt, max_dist, HitPart::InteractionPoint, Shape::closest_interaction_distance)
}

fn closest(
    shapes: &[Shape],
    pt: Point,
    max_dist: f64,
    part: HitPart,
    dist: impl Fn(&Shape, Point) -> f64,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    let mut min_dist = max_dist;
    for shape in shapes.iter().rev().filter(|s| !s.is_locked()) {
        let d = dist(shape, pt);
        if d < min_dist {
            min_dist = d;
            best = Some(Hit { shape_id: shape.id(), part, distance: d });
        }
    }
    best
}
