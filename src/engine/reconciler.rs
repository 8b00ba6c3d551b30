//! Window reconciliation: keep the materialized rows equal to the target range.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use serde::Serialize;

use super::interaction::CellCoord;
use super::row_factory::{RowFactory, RowHandle};
use crate::data::DataSource;
use crate::error::Result;
use crate::layout::RowRange;
use crate::render::RenderTarget;

/// What a reconciliation pass changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReconcileStats {
    /// Target range after the pass.
    pub target: Option<RowRange>,
    pub created: u32,
    pub removed: u32,
    /// Rows kept as-is because they were already materialized.
    pub recycled: u32,
}

impl ReconcileStats {
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.removed == 0
    }
}

/// Owns the live rows, keyed by row index.
///
/// Rows that leave the target range are removed from the container and
/// pruned from the pool, so storage never exceeds the target size.
#[derive(Debug)]
pub struct WindowReconciler<R, C> {
    preload: u32,
    pool: BTreeMap<u32, RowHandle<R, C>>,
    materialized: Option<RowRange>,
}

impl<R, C> WindowReconciler<R, C> {
    pub fn new(preload: u32) -> Self {
        Self {
            preload,
            pool: BTreeMap::new(),
            materialized: None,
        }
    }

    pub fn preload(&self) -> u32 {
        self.preload
    }

    /// Range currently held in the pool.
    pub fn materialized(&self) -> Option<RowRange> {
        self.materialized
    }

    /// Row indices currently in the pool, ascending.
    pub fn rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.pool.keys().copied()
    }

    pub fn get(&self, row: u32) -> Option<&RowHandle<R, C>> {
        self.pool.get(&row)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Make the pool match `visible` padded by the preload margin.
    ///
    /// Rows already held and still inside the target are left untouched, so
    /// their elements and any per-element state survive the pass. Only the
    /// stale rows and the rows of the new range are visited; the distance
    /// scrolled does not matter.
    ///
    /// # Errors
    /// Propagates render target failures. Rows created by the failed pass
    /// are removed again and stale rows stay removed, so the pool, the
    /// container and [`WindowReconciler::materialized`] still agree.
    pub fn reconcile<T, D>(
        &mut self,
        visible: RowRange,
        target: &mut T,
        data: &D,
        factory: &RowFactory,
        selected: Option<CellCoord>,
    ) -> Result<ReconcileStats>
    where
        T: RenderTarget<Row = R, Cell = C>,
        D: DataSource + ?Sized,
    {
        let wanted = visible.expand(self.preload);
        let mut stats = ReconcileStats {
            target: Some(wanted),
            ..ReconcileStats::default()
        };

        // Detach everything held outside the new target
        let stale: Vec<u32> = self
            .pool
            .range(..wanted.first)
            .chain(self.pool.range((Excluded(wanted.last), Unbounded)))
            .map(|(row, _)| *row)
            .collect();
        for row in stale {
            if let Some(handle) = self.pool.remove(&row) {
                log::trace!("removing row {row}");
                target.remove_row(handle.slot);
                stats.removed += 1;
            }
        }

        let columns = data.number_of_columns();
        let mut fresh = Vec::new();
        for row in wanted {
            if self.pool.contains_key(&row) {
                stats.recycled += 1;
                continue;
            }
            if let Err(e) = self.create(row, columns, target, data, factory, selected) {
                log::debug!("pass failed at row {row}, dropping {} new rows", fresh.len());
                self.roll_back(&fresh, target);
                return Err(e);
            }
            fresh.push(row);
            stats.created += 1;
        }

        self.materialized = Some(wanted);
        log::debug!(
            "reconciled rows {}..={}: +{} -{} ={}",
            wanted.first,
            wanted.last,
            stats.created,
            stats.removed,
            stats.recycled
        );
        Ok(stats)
    }

    /// Build, fill and attach one row, then hold it in the pool.
    fn create<T, D>(
        &mut self,
        row: u32,
        columns: u32,
        target: &mut T,
        data: &D,
        factory: &RowFactory,
        selected: Option<CellCoord>,
    ) -> Result<()>
    where
        T: RenderTarget<Row = R, Cell = C>,
        D: DataSource + ?Sized,
    {
        log::trace!("creating row {row}");
        let handle = factory.create_row(target, row, columns)?;
        factory.fill_row(target, &handle, data);
        if let Some(coord) = selected.filter(|c| c.row == row) {
            if let Some(cell) = handle.cell(coord.col) {
                target.set_selected(cell, true);
            }
        }
        if let Err(e) = target.append_row(&handle.slot) {
            target.remove_row(handle.slot);
            return Err(e);
        }
        self.pool.insert(row, handle);
        Ok(())
    }

    /// Remove the rows created by a failed pass.
    ///
    /// What remains is the previous window clipped to the new target, which
    /// is contiguous, so the materialized range is the pool's key span.
    fn roll_back<T>(&mut self, fresh: &[u32], target: &mut T)
    where
        T: RenderTarget<Row = R, Cell = C>,
    {
        for row in fresh {
            if let Some(handle) = self.pool.remove(row) {
                target.remove_row(handle.slot);
            }
        }
        self.materialized = match (self.pool.keys().next(), self.pool.keys().next_back()) {
            (Some(&first), Some(&last)) => Some(RowRange::new(first, last)),
            _ => None,
        };
    }

    /// Forget every row without touching the container.
    ///
    /// Used after the container has been cleared wholesale.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.materialized = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data::CellValue;
    use crate::layout::{GridMetrics, Viewport};
    use crate::render::{CellId, MemoryTarget, RowId};

    struct Numbers;

    impl DataSource for Numbers {
        fn number_of_columns(&self) -> u32 {
            2
        }

        fn get_item(&self, row: u32, col: u32) -> CellValue {
            CellValue::Number(f64::from(row) * 10.0 + f64::from(col))
        }
    }

    fn setup() -> (WindowReconciler<RowId, CellId>, MemoryTarget, RowFactory) {
        (
            WindowReconciler::new(5),
            MemoryTarget::new(Viewport::new(0.0, 310.0)),
            RowFactory::new(GridMetrics::new(30.0, 120.0, 1.0)),
        )
    }

    #[test]
    fn test_first_pass_creates_whole_target() {
        let (mut rec, mut target, factory) = setup();
        let stats = rec
            .reconcile(RowRange::new(0, 10), &mut target, &Numbers, &factory, None)
            .unwrap();
        assert_eq!(stats.created, 16);
        assert_eq!(stats.removed, 0);
        assert_eq!(rec.materialized(), Some(RowRange::new(0, 15)));
        assert_eq!(rec.rows().collect::<Vec<_>>(), (0..=15).collect::<Vec<_>>());
        assert_eq!(target.child_count(), 16);
    }

    #[test]
    fn test_scroll_reference_example() {
        let (mut rec, mut target, factory) = setup();
        rec.reconcile(RowRange::new(0, 10), &mut target, &Numbers, &factory, None)
            .unwrap();
        let kept = rec.get(15).unwrap().slot;

        let stats = rec
            .reconcile(RowRange::new(20, 30), &mut target, &Numbers, &factory, None)
            .unwrap();
        assert_eq!(stats.removed, 15);
        assert_eq!(stats.created, 20);
        assert_eq!(stats.recycled, 1);
        assert_eq!(rec.rows().collect::<Vec<_>>(), (15..=35).collect::<Vec<_>>());
        assert_eq!(rec.get(15).unwrap().slot, kept);
        assert_eq!(target.child_count(), 21);
    }

    #[test]
    fn test_idempotent() {
        let (mut rec, mut target, factory) = setup();
        rec.reconcile(RowRange::new(10, 20), &mut target, &Numbers, &factory, None)
            .unwrap();
        let again = rec
            .reconcile(RowRange::new(10, 20), &mut target, &Numbers, &factory, None)
            .unwrap();
        assert!(again.is_noop());
        assert_eq!(again.recycled, 21);
    }

    #[test]
    fn test_long_jump_visits_only_two_windows() {
        let (mut rec, mut target, factory) = setup();
        rec.reconcile(RowRange::new(0, 10), &mut target, &Numbers, &factory, None)
            .unwrap();
        let stats = rec
            .reconcile(
                RowRange::new(4_000_000_000, 4_000_000_010),
                &mut target,
                &Numbers,
                &factory,
                None,
            )
            .unwrap();
        assert_eq!(stats.removed, 16);
        assert_eq!(stats.created, 21);
        assert_eq!(rec.len(), 21);
    }

    #[test]
    fn test_selected_marker_reapplied() {
        let (mut rec, mut target, factory) = setup();
        rec.reconcile(
            RowRange::new(0, 10),
            &mut target,
            &Numbers,
            &factory,
            Some(CellCoord::new(2, 1)),
        )
        .unwrap();
        let slot = rec.get(2).unwrap().slot;
        let row = target.row(slot).unwrap();
        assert!(!row.cells.first().unwrap().selected);
        assert!(row.cells.get(1).unwrap().selected);
    }

    #[test]
    fn test_reset_forgets_rows() {
        let (mut rec, mut target, factory) = setup();
        rec.reconcile(RowRange::new(0, 10), &mut target, &Numbers, &factory, None)
            .unwrap();
        rec.reset();
        assert!(rec.is_empty());
        assert_eq!(rec.materialized(), None);
    }
}
