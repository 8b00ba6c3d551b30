//! Builds row representations and fills them from a data source.

use crate::data::DataSource;
use crate::error::Result;
use crate::layout::GridMetrics;
use crate::render::{CellPlacement, RenderTarget, RowPlacement};

/// A materialized row: the row slot plus one cell slot per column.
#[derive(Debug)]
pub struct RowHandle<R, C> {
    pub row: u32,
    pub slot: R,
    pub cells: Vec<C>,
}

impl<R, C> RowHandle<R, C> {
    pub fn cell(&self, col: u32) -> Option<&C> {
        self.cells.get(col as usize)
    }
}

/// Creates positioned rows for a fixed-size grid.
#[derive(Debug, Clone, Copy)]
pub struct RowFactory {
    metrics: GridMetrics,
}

impl RowFactory {
    pub fn new(metrics: GridMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Create a detached row for `row` holding `number_of_columns` empty cells.
    ///
    /// # Errors
    /// Propagates render target failures; the row slot is released first if
    /// a cell could not be created.
    pub fn create_row<T: RenderTarget>(
        &self,
        target: &mut T,
        row: u32,
        number_of_columns: u32,
    ) -> Result<RowHandle<T::Row, T::Cell>> {
        let m = &self.metrics;
        let slot = target.create_row_slot(RowPlacement {
            row,
            offset_y: m.row_offset(row),
            width: m.row_width(number_of_columns),
            height: m.row_height,
        })?;

        let mut cells = Vec::with_capacity(number_of_columns as usize);
        for col in 0..number_of_columns {
            let placement = CellPlacement {
                col,
                offset_x: m.col_offset(col),
                width: m.column_width,
                height: m.row_height,
            };
            match target.create_cell_slot(&slot, placement) {
                Ok(cell) => cells.push(cell),
                Err(e) => {
                    target.remove_row(slot);
                    return Err(e);
                }
            }
        }

        Ok(RowHandle { row, slot, cells })
    }

    /// Write `data.get_item(row, col)` into every cell of `handle`.
    pub fn fill_row<T: RenderTarget, D: DataSource + ?Sized>(
        &self,
        target: &mut T,
        handle: &RowHandle<T::Row, T::Cell>,
        data: &D,
    ) {
        for (col, cell) in (0u32..).zip(&handle.cells) {
            let value = data.get_item(handle.row, col);
            target.set_content(cell, &value.to_string());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::data::CellValue;
    use crate::layout::Viewport;
    use crate::render::MemoryTarget;

    struct Grid;

    impl DataSource for Grid {
        fn number_of_columns(&self) -> u32 {
            3
        }

        fn get_item(&self, row: u32, col: u32) -> CellValue {
            if row == 0 {
                CellValue::Text(format!("c{col}"))
            } else {
                CellValue::Text(format!("{row}:{col}"))
            }
        }
    }

    #[test]
    fn test_row_geometry() {
        let factory = RowFactory::new(GridMetrics::new(30.0, 120.0, 1.0));
        let mut target = MemoryTarget::new(Viewport::new(0.0, 310.0));
        let handle = factory.create_row(&mut target, 4, 3).unwrap();

        assert_eq!(handle.cells.len(), 3);
        let row = target.row(handle.slot).unwrap();
        assert_eq!(row.placement.offset_y, 4.0 * 31.0);
        assert_eq!(row.placement.height, 30.0);
        assert_eq!(row.placement.width, 3.0 * 121.0);
        assert_eq!(row.cells[2].placement.offset_x, 2.0 * 121.0);
        assert_eq!(row.cells[2].placement.width, 120.0);
        assert!(!row.attached);
    }

    #[test]
    fn test_fill_row() {
        let factory = RowFactory::new(GridMetrics::new(30.0, 120.0, 1.0));
        let mut target = MemoryTarget::new(Viewport::new(0.0, 310.0));

        let header = factory.create_row(&mut target, 0, 3).unwrap();
        factory.fill_row(&mut target, &header, &Grid);
        let body = factory.create_row(&mut target, 9, 3).unwrap();
        factory.fill_row(&mut target, &body, &Grid);

        let texts = |id| -> Vec<String> {
            target
                .row(id)
                .unwrap()
                .cells
                .iter()
                .map(|c| c.text.clone())
                .collect()
        };
        assert_eq!(texts(header.slot), ["c0", "c1", "c2"]);
        assert_eq!(texts(body.slot), ["9:0", "9:1", "9:2"]);
    }
}
