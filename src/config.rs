//! Painter configuration.
//!
//! Defaults mirror the painter's built-in constants. Hosts can deserialize a
//! config from JSON, or start from [`PainterConfig::from_env`], which lets
//! `PAINTER_*` environment variables override individual fields.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LONG_TOUCH_DELAY_MS, DEFAULT_MIN_TOUCH_DIST};
use crate::error::PainterError;
use crate::input::DrawMode;

/// Externally settable painter options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Shape a fresh gesture draws.
    pub draw_mode: DrawMode,
    /// Start with all interaction disabled.
    pub locked: bool,
    /// Tapping handles adds to the selection instead of replacing it.
    pub multiselect: bool,
    /// Hit slop around handles and vertices, in device-independent units.
    pub min_touch_dist: f64,
    /// Hold time before a stationary press becomes a long press.
    pub long_touch_delay_ms: u64,
    /// Pixels per device-independent unit.
    pub density: f64,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::default(),
            locked: false,
            multiselect: false,
            min_touch_dist: DEFAULT_MIN_TOUCH_DIST,
            long_touch_delay_ms: DEFAULT_LONG_TOUCH_DELAY_MS,
            density: 1.0,
        }
    }
}

impl PainterConfig {
    /// Defaults, overridden by any `PAINTER_*` variables that parse.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            draw_mode: env_parse("PAINTER_DRAW_MODE", defaults.draw_mode),
            locked: env_parse("PAINTER_LOCKED", defaults.locked),
            multiselect: env_parse("PAINTER_MULTISELECT", defaults.multiselect),
            min_touch_dist: env_parse("PAINTER_MIN_TOUCH_DIST", defaults.min_touch_dist),
            long_touch_delay_ms: env_parse("PAINTER_LONG_TOUCH_DELAY_MS", defaults.long_touch_delay_ms),
            density: env_parse("PAINTER_DENSITY", defaults.density),
        }
    }

    /// Parse a JSON object; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, PainterError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn long_touch_delay(&self) -> Duration {
        Duration::from_millis(self.long_touch_delay_ms)
    }

    /// Hit slop converted to surface units.
    #[must_use]
    pub fn touch_threshold(&self) -> f64 {
        self.min_touch_dist * self.density
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key).map_or(default, |v| v.trim().parse::<T>().unwrap_or(default))
}
