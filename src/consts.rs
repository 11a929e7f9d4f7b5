//! Shared numeric constants for the painter crate.

// ── Geometry defaults ───────────────────────────────────────────

/// Radius given to a freshly placed circle, in device-independent units.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 10.0;

/// x-radius given to a freshly placed ellipse.
pub const DEFAULT_ELLIPSE_RADIUS_X: f64 = 10.0;

/// y-radius given to a freshly placed ellipse.
pub const DEFAULT_ELLIPSE_RADIUS_Y: f64 = 15.0;

/// Floor for any radius edited by touch, in device-independent units.
///
/// Like the defaults above, the painter multiplies it by its density.
pub const MIN_RADIUS: f64 = 2.0;

/// Flattened coordinate count a polygon needs to be valid (three vertices).
pub const MIN_POLYGON_COORDS: usize = 6;

/// Distance reported when a shape has no handle or interaction point yet.
pub const NO_POINT_DIST: f64 = f64::INFINITY;

// ── Controller ──────────────────────────────────────────────────

/// Offset applied to a duplicated shape so it doesn't sit on its source.
pub const DUPLICATE_OFFSET: f64 = 15.0;

/// Default hit slop around handles, in device-independent units.
pub const DEFAULT_MIN_TOUCH_DIST: f64 = 10.0;

/// Default hold time before a stationary press becomes a long press.
pub const DEFAULT_LONG_TOUCH_DELAY_MS: u64 = 700;

// ── Style ───────────────────────────────────────────────────────

/// Default perimeter color (RGBA).
pub const DEFAULT_LINE_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Default perimeter color for locked shapes (RGBA).
pub const DEFAULT_LINE_COLOR_LOCKED: [f32; 4] = [0.4, 0.56, 0.36, 1.0];

/// Default handle marker color (RGBA).
pub const DEFAULT_SELECTION_POINT_COLOR: [f32; 4] = [1.0, 0.5, 0.31, 1.0];
