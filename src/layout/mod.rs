//! Geometry for the row window.
//!
//! This module handles:
//! - Converting a scroll position and viewport height into a visible row range
//! - Row and cell pixel offsets for a fixed-height grid
//! - Inclusive row ranges and their preload expansion

mod geometry;
mod viewport;

pub use geometry::{visible_range, GridMetrics, RowRange};
pub use viewport::Viewport;
