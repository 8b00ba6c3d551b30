//! Render target trait for pluggable element backends.
//!
//! This module defines the `RenderTarget` trait that abstracts the container
//! the engine manages, allowing different backends (browser DOM, headless
//! memory grid) to be used interchangeably.

use crate::error::Result;
use crate::layout::Viewport;

/// Placement of a row slot inside the scroll container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    pub row: u32,
    /// Top edge in content coordinates
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Placement of a cell slot inside its row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    pub col: u32,
    /// Left edge relative to the row
    pub offset_x: f32,
    pub width: f32,
    pub height: f32,
}

/// Trait for render targets
///
/// Implementations own the actual elements. The engine holds the returned
/// slot handles and only ever mutates direct children of the container
/// through these methods while attached.
pub trait RenderTarget {
    /// Handle to a row element.
    type Row;
    /// Handle to a cell element.
    type Cell;

    /// Current scroll offset and height of the container.
    fn viewport(&self) -> Viewport;

    /// Start delivering scroll/resize notifications to the engine's owner.
    fn subscribe(&mut self) -> Result<()> {
        Ok(())
    }

    /// Stop delivering notifications. Must be synchronous.
    fn unsubscribe(&mut self) {}

    /// Create a detached row element.
    fn create_row_slot(&mut self, placement: RowPlacement) -> Result<Self::Row>;

    /// Create a cell element inside `row`.
    fn create_cell_slot(&mut self, row: &Self::Row, placement: CellPlacement)
        -> Result<Self::Cell>;

    /// Replace the text shown by `cell`.
    fn set_content(&mut self, cell: &Self::Cell, text: &str);

    /// Toggle the selected marker on `cell`.
    fn set_selected(&mut self, cell: &Self::Cell, selected: bool);

    /// Attach `row` as a child of the container.
    fn append_row(&mut self, row: &Self::Row) -> Result<()>;

    /// Detach `row` from the container and release it.
    fn remove_row(&mut self, row: Self::Row);

    /// Move the zero-size scroll-extent marker, creating it on first use.
    fn place_sentinel(&mut self, offset_y: f32) -> Result<()>;

    /// Write the status line (hover feedback). Empty clears it.
    fn set_status(&mut self, _text: &str) {}

    /// Remove every child of the container, including the sentinel.
    fn clear(&mut self);
}
