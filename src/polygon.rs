#[cfg(test)]
#[path = "polygon_test.rs"]
mod polygon_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_POLYGON_COORDS, NO_POINT_DIST};
use crate::geom::{Point, centroid, nearest};
use crate::input::PointerEvent;

/// How an unfinished polygon collects vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonMode {
    /// One vertex per tap; a double tap closes the polygon.
    #[default]
    Click,
    /// Every down and move of the drawing gesture appends a vertex; release closes it.
    Freeform,
}

/// Closed polygon geometry.
///
/// The polygon auto-closes, so the last vertex need not repeat the first.
/// `selection_point` is the drag handle; it starts on the first vertex and
/// follows it through translation and editing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub selection_point: Option<Point>,
    pub mode: PolygonMode,
    pub(crate) ready_to_finish: bool,
    /// Vertex being dragged by the current edit gesture.
    last_point_moved: Option<usize>,
}

impl Polygon {
    #[must_use]
    pub fn new(mode: PolygonMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Polygon through `points`, handle on the first one.
    #[must_use]
    pub fn from_points(mode: PolygonMode, points: Vec<Point>) -> Self {
        let selection_point = points.first().copied();
        Self { points, selection_point, mode, ..Self::default() }
    }

    /// Build from flattened `x1, y1, x2, y2, ...` coordinates. A trailing odd value is dropped.
    #[must_use]
    pub fn from_flat(mode: PolygonMode, coords: &[f64]) -> Self {
        let points = coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect();
        Self::from_points(mode, points)
    }

    /// Vertices as flattened `x1, y1, x2, y2, ...` coordinates.
    #[must_use]
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points.len() * 2 >= MIN_POLYGON_COORDS
    }

    #[must_use]
    pub fn handle_distance(&self, p: Point) -> f64 {
        self.selection_point.map_or(NO_POINT_DIST, |s| s.distance(p))
    }

    #[must_use]
    pub fn nearest_vertex(&self, p: Point) -> Option<(usize, f64)> {
        nearest(&self.points, p)
    }

    /// Append a vertex unconditionally.
    pub fn push_vertex(&mut self, p: Point) {
        if self.selection_point.is_none() {
            self.selection_point = Some(p);
        }
        self.points.push(p);
    }

    /// Append a tapped vertex unless it lands in the same unit cell as the last one.
    pub fn push_tapped_vertex(&mut self, p: Point) -> bool {
        if self.points.last().is_some_and(|last| last.same_cell(p)) {
            return false;
        }
        self.push_vertex(p);
        true
    }

    /// Move one vertex by the motion of `ev`.
    ///
    /// The vertex is chosen on the first move of a drag, nearest to where that
    /// move started, and kept until [`Polygon::end_drag`].
    pub fn drag_vertex(&mut self, ev: &PointerEvent) -> bool {
        let i = match self.last_point_moved {
            Some(i) => i,
            None => {
                let Some((i, _)) = self.nearest_vertex(ev.prev) else {
                    return false;
                };
                self.last_point_moved = Some(i);
                i
            }
        };
        let Some(vertex) = self.points.get_mut(i) else {
            return false;
        };
        *vertex = vertex.offset(ev.delta());
        if i == 0 {
            self.selection_point = Some(*vertex);
        }
        true
    }

    /// Forget the vertex picked by the last drag.
    pub fn end_drag(&mut self) {
        self.last_point_moved = None;
    }

    pub fn translate_by(&mut self, delta: Point) {
        for p in &mut self.points {
            *p = p.offset(delta);
        }
        self.selection_point = self.selection_point.map(|s| s.offset(delta));
    }

    /// Scale every vertex's distance from the centroid by `factor`.
    pub fn rescale(&mut self, factor: f64) -> bool {
        let Some(c) = centroid(&self.points) else {
            return false;
        };
        for p in &mut self.points {
            *p = Point::new((p.x - c.x) * factor + c.x, (p.y - c.y) * factor + c.y);
        }
        self.selection_point = self.points.first().copied();
        true
    }
}
