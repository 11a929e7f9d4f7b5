use crate::shape::{ShapeId, ShapeKind};

/// Errors surfaced by the painter.
///
/// Nothing here is an I/O failure: every variant is an attempt to put the
/// painter or a shape into a state it doesn't allow.
#[derive(Debug, thiserror::Error)]
pub enum PainterError {
    #[error("cannot create a shape while the draw mode is none")]
    NoDrawMode,
    #[error("{kind} shape is not finished and cannot be added")]
    Unfinished { kind: ShapeKind },
    #[error("{kind} shape is not valid and cannot be added")]
    InvalidShape { kind: ShapeKind },
    #[error("state describes a {found} shape, expected {expected}")]
    KindMismatch { expected: ShapeKind, found: ShapeKind },
    #[error("shape not found: {0}")]
    UnknownShape(ShapeId),
    #[error("shape already present: {0}")]
    DuplicateId(ShapeId),
    #[error("malformed shape state: {0}")]
    Json(#[from] serde_json::Error),
}

impl PainterError {
    /// Stable machine-readable code for hosts that report errors.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoDrawMode => "E_NO_DRAW_MODE",
            Self::Unfinished { .. } => "E_UNFINISHED",
            Self::InvalidShape { .. } => "E_INVALID_SHAPE",
            Self::KindMismatch { .. } => "E_KIND_MISMATCH",
            Self::UnknownShape(_) => "E_UNKNOWN_SHAPE",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::Json(_) => "E_JSON",
        }
    }
}
