//! Hover and selection state for cells.

use serde::Serialize;

use crate::data::CellValue;

/// A cell position in row/column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Pointer activity on a cell, as delivered by a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter { row: u32, col: u32 },
    Leave,
    Click { row: u32, col: u32 },
}

/// Marker changes the engine must apply after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub deselect: Option<CellCoord>,
    pub select: Option<CellCoord>,
}

/// Status line shown while hovering a cell.
pub fn hover_status(coord: CellCoord, value: &CellValue) -> String {
    format!("row: {}, col: {}, data: {}", coord.row, coord.col, value)
}

/// Tracks the hovered cell and the single selected cell.
#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    hovered: Option<CellCoord>,
    selected: Option<CellCoord>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<CellCoord> {
        self.hovered
    }

    pub fn selected(&self) -> Option<CellCoord> {
        self.selected
    }

    pub fn enter(&mut self, coord: CellCoord) {
        self.hovered = Some(coord);
    }

    /// Returns the cell that was hovered, if any.
    pub fn leave(&mut self) -> Option<CellCoord> {
        self.hovered.take()
    }

    /// Toggle selection on `coord`; any other selected cell is deselected.
    pub fn click(&mut self, coord: CellCoord) -> SelectionChange {
        match self.selected {
            Some(current) if current == coord => {
                self.selected = None;
                SelectionChange {
                    deselect: Some(current),
                    select: None,
                }
            }
            previous => {
                self.selected = Some(coord);
                SelectionChange {
                    deselect: previous,
                    select: Some(coord),
                }
            }
        }
    }

    pub fn is_selected(&self, row: u32, col: u32) -> bool {
        self.selected == Some(CellCoord::new(row, col))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
