//! Rendering: turns shapes into a backend-agnostic display list.
//!
//! Nothing here draws. [`scene`] walks the painter's shapes bottom first and
//! emits [`Primitive`]s in paint order; the host maps them onto whatever
//! graphics API it uses. Sizes are scaled from device-independent units by the
//! caller-supplied density. Fill regions are separate and only produced on
//! request via [`area`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::engine::Painter;
use crate::geom::Point;
use crate::shape::{Color, Geometry, Shape};
use crate::timer::Scheduler;

/// Dash length of an unfinished polygon's closing segment, in device-independent units.
const CLOSING_DASH: f64 = 4.0;

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Stroked circle outline.
    Circle { center: Point, radius: f64, color: Color, width: f64 },
    /// Stroked ellipse outline, rotated by `angle` radians.
    Ellipse { center: Point, radius_x: f64, radius_y: f64, angle: f64, color: Color, width: f64 },
    /// Stroked line through `points`; `dash` is the dash length when dashed.
    Polyline { points: Vec<Point>, closed: bool, color: Color, width: f64, dash: Option<f64> },
    /// Square point markers.
    Points { points: Vec<Point>, color: Color, size: f64 },
}

/// Fill region of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Area {
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radius_x: f64, radius_y: f64, angle: f64 },
    /// Closed polygon contour; the host tessellates it.
    Contour(Vec<Point>),
}

/// The region inside a shape, or `None` for a polygon with no points.
#[must_use]
pub fn area(shape: &Shape) -> Option<Area> {
    match shape.geometry() {
        Geometry::Circle(c) => Some(Area::Circle { center: c.center, radius: c.radius }),
        Geometry::Ellipse(e) => Some(Area::Ellipse {
            center: e.center,
            radius_x: e.radius_x,
            radius_y: e.radius_y,
            angle: e.angle,
        }),
        Geometry::Polygon(p) if p.points.is_empty() => None,
        Geometry::Polygon(p) => Some(Area::Contour(p.points.clone())),
    }
}

/// Primitives for one shape, or none when it is hidden.
#[must_use]
pub fn shape_primitives(shape: &Shape, density: f64) -> Vec<Primitive> {
    if !shape.is_visible() {
        return Vec::new();
    }
    let style = shape.style();
    let (line_color, point_color) = if shape.is_locked() {
        (style.line_color_locked, style.line_color_locked)
    } else {
        (style.line_color, style.selection_point_color)
    };
    let width = style.line_width * density * if shape.is_selected() { 2.0 } else { 1.0 };
    let size = style.point_size * density * if shape.is_interacting() { 2.0 } else { 1.0 };

    let mut out = Vec::new();
    match shape.geometry() {
        Geometry::Circle(c) => {
            out.push(Primitive::Circle { center: c.center, radius: c.radius, color: line_color, width });
            out.push(Primitive::Points { points: vec![c.handle()], color: point_color, size });
        }
        Geometry::Ellipse(e) => {
            out.push(Primitive::Ellipse {
                center: e.center,
                radius_x: e.radius_x,
                radius_y: e.radius_y,
                angle: e.angle,
                color: line_color,
                width,
            });
            out.push(Primitive::Points { points: vec![e.handle_y()], color: line_color, size });
            out.push(Primitive::Points { points: vec![e.handle_x()], color: point_color, size });
        }
        Geometry::Polygon(p) => {
            if p.points.is_empty() {
                return out;
            }
            let finished = shape.is_finished();
            out.push(Primitive::Polyline {
                points: p.points.clone(),
                closed: finished,
                color: line_color,
                width,
                dash: None,
            });
            out.push(Primitive::Points { points: p.points.clone(), color: line_color, size });
            if let (false, [first, .., last]) = (finished, p.points.as_slice()) {
                out.push(Primitive::Polyline {
                    points: vec![*last, *first],
                    closed: false,
                    color: line_color,
                    width,
                    dash: Some(CLOSING_DASH * density),
                });
            }
            if let Some(sp) = p.selection_point {
                out.push(Primitive::Points { points: vec![sp], color: point_color, size });
            }
        }
    }
    out
}

/// The whole scene in paint order: kept shapes bottom first, then the shape being drawn.
#[must_use]
pub fn scene<S: Scheduler>(painter: &Painter<S>) -> Vec<Primitive> {
    let density = painter.config().density;
    let drawing = painter.current_shape().filter(|s| !s.is_finished());
    painter
        .shapes()
        .iter()
        .chain(drawing)
        .flat_map(|s| shape_primitives(s, density))
        .collect()
}
