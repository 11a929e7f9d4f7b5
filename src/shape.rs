//! Shape model: identity, lifecycle flags, style, and geometry dispatch.
//!
//! A [`Shape`] wraps one of the closed set of [`Geometry`] variants. The
//! variant decides what the handle is, which points can be edited, and how
//! pointer motion reshapes it; the wrapper owns the flags the controller
//! drives (`finished`, `selected`, `locked`, `interacting`).
//!
//! Selection, locking and interaction flags are flipped only through
//! [`Painter`](crate::engine::Painter) so that its collections stay in step.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::circle::Circle;
use crate::consts::{
    DEFAULT_LINE_COLOR, DEFAULT_LINE_COLOR_LOCKED, DEFAULT_SELECTION_POINT_COLOR, MIN_RADIUS, NO_POINT_DIST,
};
use crate::ellipse::Ellipse;
use crate::geom::Point;
use crate::input::PointerEvent;
use crate::polygon::{Polygon, PolygonMode};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// RGBA color, each channel in `0.0..=1.0`.
pub type Color = [f32; 4];

/// The variant of a shape; also the tag in its persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Ellipse,
    Polygon,
    Freeform,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Polygon => "polygon",
            Self::Freeform => "freeform",
        })
    }
}

/// Presentation settings, passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub line_color: Color,
    /// Perimeter width in device-independent units.
    pub line_width: f64,
    pub line_color_locked: Color,
    pub selection_point_color: Color,
    /// Marker size for vertices and handles, in device-independent units.
    pub point_size: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            line_color: DEFAULT_LINE_COLOR,
            line_width: 1.0,
            line_color_locked: DEFAULT_LINE_COLOR_LOCKED,
            selection_point_color: DEFAULT_SELECTION_POINT_COLOR,
            point_size: 2.0,
        }
    }
}

/// Variant-specific geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Circle(Circle),
    Ellipse(Ellipse),
    /// Both click-built and freeform polygons; see [`PolygonMode`].
    Polygon(Polygon),
}

/// How to move a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Translation {
    /// Shift every coordinate by this displacement.
    By(Point),
    /// Shift so that the handle lands on this position.
    To(Point),
}

/// A shape on (or being drawn onto) the painting surface.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub(crate) geometry: Geometry,
    pub(crate) style: ShapeStyle,
    pub(crate) finished: bool,
    pub(crate) selected: bool,
    pub(crate) locked: bool,
    pub(crate) interacting: bool,
    pub(crate) visible: bool,
}

impl Shape {
    fn with_geometry(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            style: ShapeStyle::default(),
            finished: false,
            selected: false,
            locked: false,
            interacting: false,
            visible: true,
        }
    }

    /// A blank, unfinished shape of `kind`, ready to be drawn by a gesture.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self::with_density(kind, 1.0)
    }

    /// [`Shape::new`] with default radii and the touch-resize floor scaled by
    /// `density` (surface units per device-independent unit).
    #[must_use]
    pub fn with_density(kind: ShapeKind, density: f64) -> Self {
        Self::with_geometry(match kind {
            ShapeKind::Circle => Geometry::Circle(Circle::sized(density)),
            ShapeKind::Ellipse => Geometry::Ellipse(Ellipse::sized(density)),
            ShapeKind::Polygon => Geometry::Polygon(Polygon::new(PolygonMode::Click)),
            ShapeKind::Freeform => Geometry::Polygon(Polygon::new(PolygonMode::Freeform)),
        })
    }

    /// Rescale the touch-resize floor for `density`; geometry is untouched.
    pub(crate) fn set_density(&mut self, density: f64) {
        let floor = MIN_RADIUS * density;
        match &mut self.geometry {
            Geometry::Circle(c) => c.min_radius = floor,
            Geometry::Ellipse(e) => e.min_radius = floor,
            Geometry::Polygon(_) => {}
        }
    }

    #[must_use]
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::with_geometry(Geometry::Circle(Circle::new(center, radius)))
    }

    #[must_use]
    pub fn ellipse(center: Point, radius_x: f64, radius_y: f64, angle: f64) -> Self {
        Self::with_geometry(Geometry::Ellipse(Ellipse::new(center, radius_x, radius_y, angle)))
    }

    #[must_use]
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::with_geometry(Geometry::Polygon(Polygon::from_points(PolygonMode::Click, points)))
    }

    #[must_use]
    pub fn freeform(points: Vec<Point>) -> Self {
        Self::with_geometry(Geometry::Polygon(Polygon::from_points(PolygonMode::Freeform, points)))
    }

    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match &self.geometry {
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Ellipse(_) => ShapeKind::Ellipse,
            Geometry::Polygon(p) => match p.mode {
                PolygonMode::Click => ShapeKind::Polygon,
                PolygonMode::Freeform => ShapeKind::Freeform,
            },
        }
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the geometry meets its variant's minimum; only valid shapes are kept.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match &self.geometry {
            Geometry::Circle(_) | Geometry::Ellipse(_) => true,
            Geometry::Polygon(p) => p.is_valid(),
        }
    }

    /// Whether drawing input so far completes the shape.
    #[must_use]
    pub fn ready_to_finish(&self) -> bool {
        match &self.geometry {
            Geometry::Circle(_) | Geometry::Ellipse(_) => true,
            Geometry::Polygon(p) => p.ready_to_finish,
        }
    }

    /// The drag handle, if the shape has one yet.
    #[must_use]
    pub fn handle(&self) -> Option<Point> {
        match &self.geometry {
            Geometry::Circle(c) => Some(c.handle()),
            Geometry::Ellipse(e) => Some(e.handle_x()),
            Geometry::Polygon(p) => p.selection_point,
        }
    }

    /// Every point that an edit gesture can grab.
    #[must_use]
    pub fn interaction_points(&self) -> Vec<Point> {
        match &self.geometry {
            Geometry::Circle(c) => vec![c.handle()],
            Geometry::Ellipse(e) => vec![e.handle_x(), e.handle_y()],
            Geometry::Polygon(p) => p.points.clone(),
        }
    }

    /// Distance from `p` to the drag handle; infinite when there is none.
    #[must_use]
    pub fn closest_handle_distance(&self, p: Point) -> f64 {
        match &self.geometry {
            Geometry::Polygon(poly) => poly.handle_distance(p),
            _ => self.handle().map_or(NO_POINT_DIST, |h| h.distance(p)),
        }
    }

    /// Distance from `p` to the nearest editable point; infinite when there is none.
    #[must_use]
    pub fn closest_interaction_distance(&self, p: Point) -> f64 {
        match &self.geometry {
            Geometry::Circle(c) => c.handle().distance(p),
            Geometry::Ellipse(e) => {
                let (dx, dy) = e.handle_distances(p);
                dx.min(dy)
            }
            Geometry::Polygon(poly) => poly.nearest_vertex(p).map_or(NO_POINT_DIST, |(_, d)| d),
        }
    }

    // --- Geometry edits ---

    /// Move the shape rigidly. Returns `false` if there was nothing to move.
    pub fn translate(&mut self, how: Translation) -> bool {
        let delta = match how {
            Translation::By(delta) => delta,
            Translation::To(pos) => match self.handle() {
                Some(handle) => pos.delta_from(handle),
                None => return false,
            },
        };
        match &mut self.geometry {
            Geometry::Circle(c) => c.translate_by(delta),
            Geometry::Ellipse(e) => e.translate_by(delta),
            Geometry::Polygon(p) => p.translate_by(delta),
        }
        true
    }

    /// Scale the shape's extent by `factor` about its center or centroid.
    pub fn rescale(&mut self, factor: f64) -> bool {
        match &mut self.geometry {
            Geometry::Circle(c) => c.rescale(factor),
            Geometry::Ellipse(e) => e.rescale(factor),
            Geometry::Polygon(p) => return p.rescale(factor),
        }
        true
    }

    // --- Gesture handlers ---

    /// A drawing gesture began at `pos` (its original down position).
    ///
    /// Returns whether the geometry changed.
    pub fn on_gesture_start(&mut self, pos: Point) -> bool {
        if self.finished {
            return false;
        }
        match &mut self.geometry {
            Geometry::Circle(c) => c.center = pos,
            Geometry::Ellipse(e) => e.center = pos,
            Geometry::Polygon(p) => match p.mode {
                PolygonMode::Click => return false,
                PolygonMode::Freeform => p.push_vertex(pos),
            },
        }
        true
    }

    /// The gesture forwarded to this shape moved.
    ///
    /// Returns whether the geometry changed.
    pub fn on_gesture_move(&mut self, ev: &PointerEvent) -> bool {
        match &mut self.geometry {
            Geometry::Circle(c) => {
                if !self.finished || !self.interacting {
                    return false;
                }
                c.drag_radius(ev);
                true
            }
            Geometry::Ellipse(e) => self.finished && self.interacting && e.drag(ev),
            Geometry::Polygon(p) => {
                if self.finished {
                    return p.drag_vertex(ev);
                }
                match p.mode {
                    PolygonMode::Click => false,
                    PolygonMode::Freeform => {
                        p.push_vertex(ev.pos);
                        true
                    }
                }
            }
        }
    }

    /// The gesture forwarded to this shape ended; `outside` when released off the surface.
    ///
    /// Returns whether the geometry changed.
    pub fn on_gesture_end(&mut self, ev: &PointerEvent, outside: bool) -> bool {
        let Geometry::Polygon(p) = &mut self.geometry else {
            return false;
        };
        if self.finished {
            p.end_drag();
            return false;
        }
        match p.mode {
            PolygonMode::Click => {
                let added = !outside && p.push_tapped_vertex(ev.pos);
                if ev.is_double_tap {
                    p.ready_to_finish = true;
                }
                added
            }
            PolygonMode::Freeform => {
                p.ready_to_finish = true;
                false
            }
        }
    }

    // --- Lifecycle ---

    /// Lock in the geometry. Returns `true` only on the first call.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        true
    }

    pub(crate) fn select(&mut self) -> bool {
        if self.selected {
            return false;
        }
        self.selected = true;
        true
    }

    pub(crate) fn deselect(&mut self) -> bool {
        if !self.selected {
            return false;
        }
        self.selected = false;
        true
    }

    pub(crate) fn lock(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    pub(crate) fn unlock(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        true
    }

    pub(crate) fn start_interaction(&mut self) -> bool {
        if self.interacting {
            return false;
        }
        self.interacting = true;
        true
    }

    pub(crate) fn stop_interaction(&mut self) -> bool {
        if !self.interacting {
            return false;
        }
        self.interacting = false;
        if let Geometry::Polygon(p) = &mut self.geometry {
            p.end_drag();
        }
        true
    }

    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        true
    }

    pub(crate) fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    /// A finished copy with the same geometry and style but a fresh identity,
    /// unselected, unlocked and visible.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut geometry = self.geometry.clone();
        if let Geometry::Polygon(p) = &mut geometry {
            p.end_drag();
        }
        Self { finished: true, ..Self::with_geometry(geometry).with_style(self.style.clone()) }
    }
}
