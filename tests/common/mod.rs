//! Shared builders for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_precision_loss
)]

use std::rc::Rc;

use serde_json::{json, Map, Value};
use toby::render::{CellId, CellPlacement, RowId, RowPlacement};
use toby::{
    CellValue, ColumnSet, DataProvider, DataSource, Dataset, Engine, EngineConfig, MemoryTarget,
    RenderTarget, Result, TobyError, Viewport,
};

/// Viewport height used throughout: rows 0..=10 visible at scroll 0.
pub const HEIGHT: f64 = 310.0;

/// Distance between row tops with the default config.
pub const PITCH: f64 = 31.0;

/// Source whose value is derived from its coordinates.
pub struct Grid {
    pub columns: u32,
}

impl DataSource for Grid {
    fn number_of_columns(&self) -> u32 {
        self.columns
    }

    fn get_item(&self, row: u32, col: u32) -> CellValue {
        CellValue::Text(format!("{row}:{col}"))
    }
}

/// Star catalogue extract with `count` records and six fields each.
pub fn stars(count: usize) -> Rc<Dataset> {
    let records = (0..count)
        .map(|i| {
            let mut record = Map::new();
            record.insert("id".into(), json!(i.to_string()));
            record.insert("hip".into(), json!((i * 7).to_string()));
            let proper = if i == 0 {
                "Sol".to_string()
            } else {
                format!("Star {i}")
            };
            record.insert("proper".into(), json!(proper));
            record.insert("ra".into(), json!(format!("{:.6}", i as f64 * 0.001)));
            record.insert("dec".into(), json!(format!("{:.6}", i as f64 * -0.002)));
            let dist = if i % 3 == 0 {
                Value::Null
            } else {
                json!(i as f64 * 1.5)
            };
            record.insert("dist".into(), dist);
            record
        })
        .collect();
    Rc::new(Dataset::from_records(records))
}

pub fn provider(count: usize, columns: ColumnSet) -> DataProvider {
    DataProvider::with_columns(stars(count), columns)
}

/// Engine over a [`Grid`] attached at scroll 0.
pub fn attached_grid(columns: u32) -> Engine<Grid, MemoryTarget> {
    let mut engine = Engine::new(Grid { columns }, EngineConfig::default());
    engine
        .attach_to(MemoryTarget::new(Viewport::new(0.0, HEIGHT)))
        .expect("attach");
    engine
}

/// Scroll the attached target and let the engine catch up.
pub fn scroll_to<D: DataSource>(engine: &mut Engine<D, MemoryTarget>, scroll_top: f64) {
    engine
        .target_mut()
        .expect("attached")
        .set_scroll_top(scroll_top);
    engine.refresh().expect("refresh");
}

/// Row indices shown by the attached row elements, ascending.
pub fn shown_rows(target: &MemoryTarget) -> Vec<u32> {
    let mut rows: Vec<u32> = target.rows().map(|(_, r)| r.placement.row).collect();
    rows.sort_unstable();
    rows
}

/// [`MemoryTarget`] that refuses to attach one row or create one cell.
pub struct FailingTarget {
    pub inner: MemoryTarget,
    pub fail_append: Option<u32>,
    pub fail_cell: Option<(u32, u32)>,
}

impl FailingTarget {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: MemoryTarget::new(viewport),
            fail_append: None,
            fail_cell: None,
        }
    }

    fn row_index(&self, id: RowId) -> Option<u32> {
        self.inner.row(id).map(|r| r.placement.row)
    }

    /// Row elements the target still holds, attached or not.
    pub fn live_elements(&self) -> u64 {
        self.inner.created_count() - self.inner.removed_count()
    }
}

impl RenderTarget for FailingTarget {
    type Row = RowId;
    type Cell = CellId;

    fn viewport(&self) -> Viewport {
        self.inner.viewport()
    }

    fn create_row_slot(&mut self, placement: RowPlacement) -> Result<RowId> {
        self.inner.create_row_slot(placement)
    }

    fn create_cell_slot(&mut self, row: &RowId, placement: CellPlacement) -> Result<CellId> {
        if self.fail_cell.is_some_and(|(r, c)| {
            self.row_index(*row) == Some(r) && placement.col == c
        }) {
            return Err(TobyError::Render("cell refused".to_string()));
        }
        self.inner.create_cell_slot(row, placement)
    }

    fn set_content(&mut self, cell: &CellId, text: &str) {
        self.inner.set_content(cell, text);
    }

    fn set_selected(&mut self, cell: &CellId, selected: bool) {
        self.inner.set_selected(cell, selected);
    }

    fn append_row(&mut self, row: &RowId) -> Result<()> {
        if self.fail_append.is_some() && self.row_index(*row) == self.fail_append {
            return Err(TobyError::Render("append refused".to_string()));
        }
        self.inner.append_row(row)
    }

    fn remove_row(&mut self, row: RowId) {
        self.inner.remove_row(row);
    }

    fn place_sentinel(&mut self, offset_y: f32) -> Result<()> {
        self.inner.place_sentinel(offset_y)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}
