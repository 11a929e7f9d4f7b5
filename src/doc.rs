//! Persisted shape state and the whole-document format.
//!
//! [`ShapeState`] is a flat record of primitive fields (numbers, lists of
//! numbers, and a `kind` tag) that is enough to rebuild an equivalent shape.
//! It carries geometry, style, and the lock flag, and leaves out identity,
//! selection, and interaction, which belong to a live painter. [`Document`]
//! bundles the states of every shape in z-order for saving and restoring.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::ellipse::Ellipse;
use crate::error::PainterError;
use crate::geom::Point;
use crate::polygon::{Polygon, PolygonMode};
use crate::shape::{Geometry, Shape, ShapeKind, ShapeStyle};

/// Geometry part of a persisted shape, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeometryState {
    Circle {
        center: [f64; 2],
        radius: f64,
    },
    Ellipse {
        center: [f64; 2],
        radius_x: f64,
        radius_y: f64,
        angle: f64,
    },
    Polygon {
        points: Vec<f64>,
        #[serde(default)]
        selection_point: Vec<f64>,
    },
    Freeform {
        points: Vec<f64>,
        #[serde(default)]
        selection_point: Vec<f64>,
    },
}

impl GeometryState {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Ellipse { .. } => ShapeKind::Ellipse,
            Self::Polygon { .. } => ShapeKind::Polygon,
            Self::Freeform { .. } => ShapeKind::Freeform,
        }
    }
}

/// Everything needed to rebuild a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeState {
    #[serde(flatten)]
    pub geometry: GeometryState,
    #[serde(flatten)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub locked: bool,
}

impl ShapeState {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}

/// Saved painter contents, bottom shape first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub shapes: Vec<ShapeState>,
}

impl Document {
    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, PainterError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a document previously produced by [`Document::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `Json` when the text is not a valid document.
    pub fn from_json(text: &str) -> Result<Self, PainterError> {
        Ok(serde_json::from_str(text)?)
    }
}

fn pair(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

fn polygon_state(p: &Polygon) -> (Vec<f64>, Vec<f64>) {
    let selection = p.selection_point.map(|s| vec![s.x, s.y]).unwrap_or_default();
    (p.flat_points(), selection)
}

fn polygon_from_state(mode: PolygonMode, points: &[f64], selection_point: &[f64]) -> Polygon {
    let mut poly = Polygon::from_flat(mode, points);
    if let [x, y, ..] = selection_point {
        poly.selection_point = Some(Point::new(*x, *y));
    }
    poly
}

impl Shape {
    /// Snapshot geometry, style, and lock flag.
    #[must_use]
    pub fn state(&self) -> ShapeState {
        let geometry = match &self.geometry {
            Geometry::Circle(c) => GeometryState::Circle { center: pair(c.center), radius: c.radius },
            Geometry::Ellipse(e) => GeometryState::Ellipse {
                center: pair(e.center),
                radius_x: e.radius_x,
                radius_y: e.radius_y,
                angle: e.angle,
            },
            Geometry::Polygon(p) => {
                let (points, selection_point) = polygon_state(p);
                match p.mode {
                    PolygonMode::Click => GeometryState::Polygon { points, selection_point },
                    PolygonMode::Freeform => GeometryState::Freeform { points, selection_point },
                }
            }
        };
        ShapeState { geometry, style: self.style.clone(), locked: self.locked }
    }

    /// Overwrite this shape from `state` and mark it finished.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if `state` describes a different variant.
    pub fn apply_state(&mut self, state: &ShapeState) -> Result<(), PainterError> {
        if state.kind() != self.kind() {
            return Err(PainterError::KindMismatch { expected: self.kind(), found: state.kind() });
        }
        self.load(state);
        Ok(())
    }

    /// Build a finished shape of the variant named in `state`.
    #[must_use]
    pub fn from_state(state: &ShapeState) -> Self {
        let mut shape = Self::new(state.kind());
        shape.load(state);
        shape
    }

    fn load(&mut self, state: &ShapeState) {
        self.geometry = match &state.geometry {
            GeometryState::Circle { center, radius } => {
                Geometry::Circle(Circle::new(Point::new(center[0], center[1]), *radius))
            }
            GeometryState::Ellipse { center, radius_x, radius_y, angle } => Geometry::Ellipse(
                Ellipse::new(Point::new(center[0], center[1]), *radius_x, *radius_y, *angle),
            ),
            GeometryState::Polygon { points, selection_point } => {
                Geometry::Polygon(polygon_from_state(PolygonMode::Click, points, selection_point))
            }
            GeometryState::Freeform { points, selection_point } => {
                Geometry::Polygon(polygon_from_state(PolygonMode::Freeform, points, selection_point))
            }
        };
        self.style = state.style.clone();
        self.finish();
        if state.locked {
            self.lock();
        } else {
            self.unlock();
        }
    }
}
