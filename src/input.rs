//! Input model: draw modes, modifier keys, pointer events, and per-gesture context.
//!
//! This module defines the types consumed by the gesture state machine.
//! `DrawMode` and `Modifiers` capture the user's intent at the time of a
//! pointer event. `Gesture` is the short-lived context created at pointer-down,
//! threaded through move and up handling, and discarded when the gesture ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::shape::{ShapeId, ShapeKind};
use crate::timer::TimerId;

/// Which shape a fresh gesture draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Tap to place a circle.
    Circle,
    /// Tap to place an ellipse.
    Ellipse,
    /// Tap once per vertex, double tap to close.
    Polygon,
    /// Trace a polygon by dragging (default).
    #[default]
    Freeform,
    /// Drawing disabled; gestures only select and drag.
    None,
}

impl DrawMode {
    /// The shape variant this mode instantiates, if any.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Circle => Some(ShapeKind::Circle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Polygon => Some(ShapeKind::Polygon),
            Self::Freeform => Some(ShapeKind::Freeform),
            Self::None => None,
        }
    }

    /// Lowercase name as used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Polygon => "polygon",
            Self::Freeform => "freeform",
            Self::None => "none",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown draw mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown draw mode: {0}")]
pub struct UnknownDrawMode(pub String);

impl FromStr for DrawMode {
    type Err = UnknownDrawMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "ellipse" => Ok(Self::Ellipse),
            "polygon" => Ok(Self::Polygon),
            "freeform" => Ok(Self::Freeform),
            "none" => Ok(Self::None),
            other => Err(UnknownDrawMode(other.to_owned())),
        }
    }
}

/// Keyboard modifier keys held during a key event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Host-assigned identifier of one pointer (finger, mouse button stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// A pointer down, move, or up delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Which pointer produced this event.
    pub pointer: PointerId,
    /// Current position.
    pub pos: Point,
    /// Position at the previous event of this pointer (equal to `pos` on down).
    pub prev: Point,
    /// The host recognised this press as the second tap of a double tap.
    pub is_double_tap: bool,
    /// Whether `pos` lies within the painting surface bounds.
    pub inside: bool,
}

impl PointerEvent {
    /// A stationary event at `pos` for the default pointer.
    #[must_use]
    pub fn at(pos: Point) -> Self {
        Self { pointer: PointerId::default(), pos, prev: pos, is_double_tap: false, inside: true }
    }

    /// Same event, arriving from `prev`.
    #[must_use]
    pub fn from_prev(mut self, prev: Point) -> Self {
        self.prev = prev;
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }

    #[must_use]
    pub fn double_tap(mut self) -> Self {
        self.is_double_tap = true;
        self
    }

    #[must_use]
    pub fn outside(mut self) -> Self {
        self.inside = false;
        self
    }

    /// Displacement since the previous event.
    #[must_use]
    pub fn delta(&self) -> Point {
        self.pos.delta_from(self.prev)
    }
}

/// Which Ctrl key a key event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CtrlSide {
    Left,
    Right,
    /// Host could not tell the two apart.
    Either,
}

/// A logical key, parsed from the host's key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Ctrl(CtrlSide),
    Left,
    Right,
    Up,
    Down,
    Delete,
    Escape,
    Char(char),
    Other(String),
}

impl Key {
    /// Parse a logical key name such as `"lctrl"`, `"left"`, `"delete"`, or `"a"`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "lctrl" | "controlleft" => Self::Ctrl(CtrlSide::Left),
            "rctrl" | "controlright" => Self::Ctrl(CtrlSide::Right),
            "ctrl" | "control" => Self::Ctrl(CtrlSide::Either),
            "left" | "arrowleft" => Self::Left,
            "right" | "arrowright" => Self::Right,
            "up" | "arrowup" => Self::Up,
            "down" | "arrowdown" => Self::Down,
            "delete" | "del" => Self::Delete,
            "escape" | "esc" => Self::Escape,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(name.to_owned()),
                }
            }
        }
    }

    /// Unit displacement for arrow keys, y-up.
    #[must_use]
    pub fn arrow_delta(&self) -> Option<Point> {
        match self {
            Self::Left => Some(Point::new(-1.0, 0.0)),
            Self::Right => Some(Point::new(1.0, 0.0)),
            Self::Up => Some(Point::new(0.0, 1.0)),
            Self::Down => Some(Point::new(0.0, -1.0)),
            _ => None,
        }
    }
}

/// How the gesture in flight has been interpreted so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Not yet classified; decided on first move, on up, or by the long-press timer.
    #[default]
    Unresolved,
    /// Forwarding to the current shape (being drawn or edited).
    Current,
    /// Forwarding to a shape this gesture created.
    CurrentNew,
    /// Pressed on a shape's handle: select, or drag the selection.
    Selected,
    /// Fully consumed; further events are swallowed.
    Done,
}

/// Context for the one gesture currently claimed by the painter.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    /// Pointer that owns the gesture.
    pub pointer: PointerId,
    /// Position of the pointer-down.
    pub origin: Point,
    /// Latest position seen (the long-press fires here).
    pub last_pos: Point,
    pub resolution: Resolution,
    /// At least one move was delivered.
    pub moved: bool,
    /// Shape whose handle was pressed, for `Resolution::Selected`.
    pub target: Option<ShapeId>,
    /// `target` was not selected when the gesture began.
    pub target_was_unselected: bool,
    /// Pointer-down finished the previous current shape.
    pub cleared_current: bool,
    /// Pending long-press timer.
    pub timer: Option<TimerId>,
}

impl Gesture {
    #[must_use]
    pub fn new(pointer: PointerId, origin: Point) -> Self {
        Self {
            pointer,
            origin,
            last_pos: origin,
            resolution: Resolution::Unresolved,
            moved: false,
            target: None,
            target_was_unselected: false,
            cleared_current: false,
            timer: None,
        }
    }
}
