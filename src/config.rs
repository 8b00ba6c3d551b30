//! Engine configuration.
//!
//! All sizes are logical pixels. Missing fields fall back to the defaults
//! below, unknown fields are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TobyError};
use crate::layout::GridMetrics;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 30.0;

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f32 = 120.0;

/// Default border between rows and between cells
pub const DEFAULT_BORDER_WIDTH: f32 = 1.0;

/// Rows materialized beyond each edge of the visible range
pub const DEFAULT_PRELOAD_ROWS: u32 = 5;

/// Rows the scroll sentinel is kept ahead of the last materialized row
pub const DEFAULT_SENTINEL_MARGIN: u32 = 10;

/// Tunables for an engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub row_height: f32,
    pub column_width: f32,
    pub border_width: f32,
    /// Preload margin `P` applied on both edges of the visible range.
    pub preload_rows: u32,
    /// Independent of `preload_rows`.
    pub sentinel_margin: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
            border_width: DEFAULT_BORDER_WIDTH,
            preload_rows: DEFAULT_PRELOAD_ROWS,
            sentinel_margin: DEFAULT_SENTINEL_MARGIN,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    /// Returns [`TobyError::Config`] if the JSON is malformed or a size is
    /// not a positive finite number.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TobyError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes that would make the row pitch zero, negative or NaN.
    ///
    /// # Errors
    /// Returns [`TobyError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(TobyError::Config(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(TobyError::Config(format!(
                "column_width must be positive, got {}",
                self.column_width
            )));
        }
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(TobyError::Config(format!(
                "border_width must not be negative, got {}",
                self.border_width
            )));
        }
        Ok(())
    }

    /// Fixed grid sizes derived from this configuration.
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.row_height, self.column_width, self.border_width)
    }
}
