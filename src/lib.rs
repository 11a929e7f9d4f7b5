//! Interactive vector-shape painter core.
//!
//! This crate owns the shapes on a painting surface and the gesture logic that
//! draws, selects, drags, and edits them. It does not draw pixels or read
//! devices: the host feeds it pointer, key, and timer events, renders the
//! display list from [`render::scene`], and reacts to the
//! [`engine::Action`]s it queues.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Painter`] controller: collection, selection, lifecycle |
//! | [`gesture`] | Pointer gesture state machine and long press |
//! | [`keys`] | Keyboard shortcuts |
//! | [`shape`] | Shape identity, flags, style, and geometry dispatch |
//! | [`circle`], [`ellipse`], [`polygon`] | Per-variant geometry and drag math |
//! | [`hit`] | Hit-testing against handles and editable points |
//! | [`input`] | Pointer events, keys, draw modes, gesture context |
//! | [`timer`] | Long-press scheduling |
//! | [`doc`] | Persisted shape state and JSON documents |
//! | [`render`] | Backend-agnostic display list |
//! | [`config`] | Painter options, env overrides |
//! | [`error`] | Error type |
//! | [`geom`] | Points and small geometry helpers |
//! | [`consts`] | Default sizes, thresholds, and colors |

pub mod circle;
pub mod config;
pub mod consts;
pub mod doc;
pub mod ellipse;
pub mod engine;
pub mod error;
pub mod geom;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod keys;
pub mod polygon;
pub mod render;
pub mod shape;
pub mod timer;

pub use config::PainterConfig;
pub use engine::{Action, Painter};
pub use error::PainterError;
pub use shape::{Shape, ShapeId, ShapeKind};
