//! Scroll-extent sentinel.
//!
//! A zero-size marker kept `margin` rows below the last materialized row, so
//! the container's scrollable height grows as the user scrolls without ever
//! laying out the whole dataset. The marker only moves down for as long as
//! the engine stays attached. Destroying the engine clears the container,
//! taking the marker with it, so a later attach places it afresh from the
//! new window.

use crate::error::Result;
use crate::layout::GridMetrics;
use crate::render::RenderTarget;

#[derive(Debug, Clone)]
pub struct ScrollSentinel {
    margin: u32,
    position: Option<u32>,
}

impl ScrollSentinel {
    pub fn new(margin: u32) -> Self {
        Self {
            margin,
            position: None,
        }
    }

    /// Row the marker currently sits at, `None` before first placement.
    pub fn position(&self) -> Option<u32> {
        self.position
    }

    /// Push the marker to `target_last + margin` if that is further down.
    ///
    /// Returns whether the marker moved.
    ///
    /// # Errors
    /// Propagates render target failures; the recorded position is left
    /// unchanged in that case.
    pub fn ensure_extent<T: RenderTarget>(
        &mut self,
        target_last: u32,
        target: &mut T,
        metrics: &GridMetrics,
    ) -> Result<bool> {
        let stretch_row = target_last.saturating_add(self.margin);
        if self.position.is_some_and(|p| stretch_row <= p) {
            return Ok(false);
        }
        target.place_sentinel(metrics.row_offset(stretch_row))?;
        self.position = Some(stretch_row);
        Ok(true)
    }

    /// Forget the position; the marker left with the cleared container.
    pub fn reset(&mut self) {
        self.position = None;
    }
}
