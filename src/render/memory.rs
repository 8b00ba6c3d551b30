//! Headless render target.
//!
//! Keeps rows and cells in plain maps so the engine can be driven and
//! inspected without a browser. Also renders the viewport as a text grid
//! for the CLI.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::{CellPlacement, RenderTarget, RowPlacement};
use crate::error::Result;
use crate::layout::Viewport;

/// Handle to a row created by [`MemoryTarget`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// Handle to a cell created by [`MemoryTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub row: RowId,
    pub col: u32,
}

/// A row element held by [`MemoryTarget`]
#[derive(Debug, Clone)]
pub struct MemoryRow {
    pub placement: RowPlacement,
    pub cells: Vec<MemoryCell>,
    pub attached: bool,
    /// Free-form marker for tests that check a row survived recycling.
    pub flag: bool,
}

/// A cell element held by [`MemoryTarget`]
#[derive(Debug, Clone)]
pub struct MemoryCell {
    pub placement: CellPlacement,
    pub text: String,
    pub selected: bool,
}

/// In-memory container with a settable viewport.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    viewport: Viewport,
    rows: BTreeMap<RowId, MemoryRow>,
    next_id: u64,
    sentinel: Option<f32>,
    status: String,
    subscribed: bool,
    created: u64,
    removed: u64,
}

impl MemoryTarget {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Scroll the container. The engine must be notified separately.
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.viewport = self.viewport.scrolled_to(scroll_top);
    }

    /// Resize the container. The engine must be notified separately.
    pub fn set_height(&mut self, height: f64) {
        self.viewport = self.viewport.resized(height);
    }

    /// Attached row elements in creation order.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &MemoryRow)> {
        self.rows
            .iter()
            .filter(|(_, row)| row.attached)
            .map(|(id, row)| (*id, row))
    }

    pub fn row(&self, id: RowId) -> Option<&MemoryRow> {
        self.rows.get(&id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut MemoryRow> {
        self.rows.get_mut(&id)
    }

    /// The attached row element showing dataset row `row`, if any.
    pub fn find_row(&self, row: u32) -> Option<(RowId, &MemoryRow)> {
        self.rows().find(|(_, r)| r.placement.row == row)
    }

    /// Number of attached row elements.
    pub fn child_count(&self) -> usize {
        self.rows().count()
    }

    /// Sentinel offset in pixels, `None` until first placed.
    pub fn sentinel(&self) -> Option<f32> {
        self.sentinel
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Total row elements ever created.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Total row elements ever removed.
    pub fn removed_count(&self) -> u64 {
        self.removed
    }

    /// Render attached rows intersecting the viewport as fixed-width text.
    ///
    /// Each cell is truncated or padded to `cell_chars` characters; the
    /// selected cell is wrapped in brackets.
    pub fn render_text(&self, cell_chars: usize) -> String {
        let top = self.viewport.scroll_top;
        let bottom = top + self.viewport.height;
        let mut visible: Vec<&MemoryRow> = self
            .rows()
            .map(|(_, row)| row)
            .filter(|row| {
                let y = f64::from(row.placement.offset_y);
                y + f64::from(row.placement.height) > top && y < bottom
            })
            .collect();
        visible.sort_by_key(|row| row.placement.row);

        let mut out = String::new();
        for row in visible {
            let _ = write!(out, "{:>6} |", row.placement.row);
            for cell in &row.cells {
                let text: String = cell.text.chars().take(cell_chars).collect();
                if cell.selected {
                    let _ = write!(out, "[{text:<cell_chars$}]|");
                } else {
                    let _ = write!(out, " {text:<cell_chars$} |");
                }
            }
            out.push('\n');
        }
        out
    }
}

impl RenderTarget for MemoryTarget {
    type Row = RowId;
    type Cell = CellId;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn subscribe(&mut self) -> Result<()> {
        self.subscribed = true;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    fn create_row_slot(&mut self, placement: RowPlacement) -> Result<RowId> {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.rows.insert(
            id,
            MemoryRow {
                placement,
                cells: Vec::new(),
                attached: false,
                flag: false,
            },
        );
        Ok(id)
    }

    fn create_cell_slot(&mut self, row: &RowId, placement: CellPlacement) -> Result<CellId> {
        if let Some(r) = self.rows.get_mut(row) {
            r.cells.push(MemoryCell {
                placement,
                text: String::new(),
                selected: false,
            });
        }
        Ok(CellId {
            row: *row,
            col: placement.col,
        })
    }

    fn set_content(&mut self, cell: &CellId, text: &str) {
        if let Some(c) = self.cell_mut(cell) {
            c.text.clear();
            c.text.push_str(text);
        }
    }

    fn set_selected(&mut self, cell: &CellId, selected: bool) {
        if let Some(c) = self.cell_mut(cell) {
            c.selected = selected;
        }
    }

    fn append_row(&mut self, row: &RowId) -> Result<()> {
        if let Some(r) = self.rows.get_mut(row) {
            r.attached = true;
        }
        Ok(())
    }

    fn remove_row(&mut self, row: RowId) {
        if self.rows.remove(&row).is_some() {
            self.removed += 1;
        }
    }

    fn place_sentinel(&mut self, offset_y: f32) -> Result<()> {
        self.sentinel = Some(offset_y);
        Ok(())
    }

    fn set_status(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.sentinel = None;
    }
}

impl MemoryTarget {
    fn cell_mut(&mut self, cell: &CellId) -> Option<&mut MemoryCell> {
        self.rows
            .get_mut(&cell.row)?
            .cells
            .iter_mut()
            .find(|c| c.placement.col == cell.col)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;

    fn placement(row: u32) -> RowPlacement {
        RowPlacement {
            row,
            offset_y: row as f32 * 31.0,
            width: 242.0,
            height: 30.0,
        }
    }

    fn cell(col: u32) -> CellPlacement {
        CellPlacement {
            col,
            offset_x: col as f32 * 121.0,
            width: 120.0,
            height: 30.0,
        }
    }

    #[test]
    fn test_rows_only_listed_once_appended() {
        let mut target = MemoryTarget::new(Viewport::new(0.0, 100.0));
        let id = target.create_row_slot(placement(0)).unwrap();
        assert_eq!(target.child_count(), 0);
        target.append_row(&id).unwrap();
        assert_eq!(target.child_count(), 1);
        target.remove_row(id);
        assert_eq!(target.child_count(), 0);
        assert_eq!(target.removed_count(), 1);
    }

    #[test]
    fn test_content_and_selection() {
        let mut target = MemoryTarget::new(Viewport::new(0.0, 100.0));
        let id = target.create_row_slot(placement(1)).unwrap();
        let a = target.create_cell_slot(&id, cell(0)).unwrap();
        let b = target.create_cell_slot(&id, cell(1)).unwrap();
        target.set_content(&a, "Sirius");
        target.set_selected(&b, true);
        let row = target.row(id).unwrap();
        assert_eq!(row.cells[0].text, "Sirius");
        assert!(row.cells[1].selected);
    }

    #[test]
    fn test_render_text_skips_offscreen_rows() {
        let mut target = MemoryTarget::new(Viewport::new(0.0, 40.0));
        for r in [0, 5] {
            let id = target.create_row_slot(placement(r)).unwrap();
            let c = target.create_cell_slot(&id, cell(0)).unwrap();
            target.set_content(&c, &format!("row{r}"));
            target.append_row(&id).unwrap();
        }
        let text = target.render_text(6);
        assert!(text.contains("row0"));
        assert!(!text.contains("row5"));
    }

    #[test]
    fn test_clear_drops_sentinel() {
        let mut target = MemoryTarget::new(Viewport::new(0.0, 40.0));
        target.place_sentinel(310.0).unwrap();
        assert_eq!(target.sentinel(), Some(310.0));
        target.clear();
        assert_eq!(target.sentinel(), None);
    }
}
