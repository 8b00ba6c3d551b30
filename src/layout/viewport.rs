//! Viewport snapshot for vertical scrolling.

use serde::Serialize;

use super::{GridMetrics, RowRange};

/// Viewport state - the visible area of the scroll container at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Viewport {
    /// Vertical scroll position in content coordinates
    pub scroll_top: f64,
    /// Viewport height in pixels
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }

    /// Visible row range (inclusive) for this snapshot.
    pub fn visible_rows(&self, metrics: &GridMetrics) -> RowRange {
        metrics.visible_range(self.scroll_top, self.height)
    }

    /// Same viewport scrolled to `scroll_top`, clamped at the top edge.
    pub fn scrolled_to(self, scroll_top: f64) -> Self {
        Self {
            scroll_top: scroll_top.max(0.0),
            ..self
        }
    }

    /// Same viewport resized to `height`.
    pub fn resized(self, height: f64) -> Self {
        Self {
            height: height.max(0.0),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_rows_after_scroll() {
        let metrics = GridMetrics::new(30.0, 120.0, 1.0);
        let viewport = Viewport::new(0.0, 310.0).scrolled_to(620.0);
        assert_eq!(viewport.visible_rows(&metrics), RowRange::new(20, 30));
    }

    #[test]
    fn test_scroll_clamped_at_top() {
        let viewport = Viewport::new(100.0, 310.0).scrolled_to(-40.0);
        assert!(viewport.scroll_top.abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_grows_range() {
        let metrics = GridMetrics::new(30.0, 120.0, 1.0);
        let viewport = Viewport::new(0.0, 310.0).resized(620.0);
        assert_eq!(viewport.visible_rows(&metrics), RowRange::new(0, 20));
    }
}
