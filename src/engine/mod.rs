//! The row window engine.
//!
//! [`Engine`] ties together geometry, the window reconciler, the row
//! factory, the scroll sentinel and the interaction tracker, and owns the
//! attach/destroy lifecycle of a render target:
//!
//! - `attach_to` subscribes to viewport notifications and renders the first
//!   window against the target's current viewport
//! - `on_viewport_changed` / `refresh` reconcile against the latest snapshot
//! - `destroy` drops the subscriptions, clears the container and hands the
//!   target back
//!
//! Attaching twice or destroying an unattached engine is reported as an
//! error and otherwise ignored.

mod interaction;
mod reconciler;
mod row_factory;
mod sentinel;

pub use interaction::{hover_status, CellCoord, InteractionTracker, PointerEvent, SelectionChange};
pub use reconciler::{ReconcileStats, WindowReconciler};
pub use row_factory::{RowFactory, RowHandle};
pub use sentinel::ScrollSentinel;

use crate::config::EngineConfig;
use crate::data::{CellValue, DataSource};
use crate::error::{Result, TobyError};
use crate::layout::{GridMetrics, RowRange, Viewport};
use crate::render::RenderTarget;

enum Lifecycle<T> {
    Unattached,
    Attached(T),
}

/// Windowed renderer for one data source.
pub struct Engine<D: DataSource, T: RenderTarget> {
    data: D,
    config: EngineConfig,
    factory: RowFactory,
    reconciler: WindowReconciler<T::Row, T::Cell>,
    sentinel: ScrollSentinel,
    interaction: InteractionTracker,
    state: Lifecycle<T>,
}

impl<D: DataSource, T: RenderTarget> Engine<D, T> {
    /// Create an unattached engine.
    pub fn new(data: D, config: EngineConfig) -> Self {
        Self {
            factory: RowFactory::new(config.metrics()),
            reconciler: WindowReconciler::new(config.preload_rows),
            sentinel: ScrollSentinel::new(config.sentinel_margin),
            interaction: InteractionTracker::new(),
            state: Lifecycle::Unattached,
            data,
            config,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, Lifecycle::Attached(_))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &GridMetrics {
        self.factory.metrics()
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn target(&self) -> Option<&T> {
        match &self.state {
            Lifecycle::Attached(target) => Some(target),
            Lifecycle::Unattached => None,
        }
    }

    pub fn target_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            Lifecycle::Attached(target) => Some(target),
            Lifecycle::Unattached => None,
        }
    }

    /// Start managing `target` and render the first window.
    ///
    /// # Errors
    /// [`TobyError::AlreadyAttached`] if a target is already managed; `target`
    /// is dropped and the engine is unchanged. Render failures during the
    /// first pass leave the engine unattached with the target cleared.
    pub fn attach_to(&mut self, mut target: T) -> Result<ReconcileStats> {
        if self.is_attached() {
            log::warn!("attach_to called on an attached engine; ignoring");
            return Err(TobyError::AlreadyAttached);
        }

        target.subscribe()?;
        let visible = target.viewport().visible_rows(self.factory.metrics());
        self.state = Lifecycle::Attached(target);

        match self.reconcile(visible) {
            Ok(stats) => {
                log::debug!("attached, {} rows materialized", stats.created);
                Ok(stats)
            }
            Err(e) => {
                let _ = self.detach();
                Err(e)
            }
        }
    }

    /// Stop managing the target, clear it and hand it back.
    ///
    /// # Errors
    /// [`TobyError::NotAttached`] if there is nothing to destroy.
    pub fn destroy(&mut self) -> Result<T> {
        if !self.is_attached() {
            log::warn!("destroy called on an unattached engine; ignoring");
            return Err(TobyError::NotAttached);
        }
        self.detach().ok_or(TobyError::NotAttached)
    }

    fn detach(&mut self) -> Option<T> {
        let Lifecycle::Attached(mut target) =
            std::mem::replace(&mut self.state, Lifecycle::Unattached)
        else {
            return None;
        };
        target.unsubscribe();
        target.set_status("");
        target.clear();
        self.reconciler.reset();
        self.sentinel.reset();
        self.interaction.reset();
        Some(target)
    }

    /// Reconcile against an explicit viewport snapshot.
    ///
    /// # Errors
    /// [`TobyError::NotAttached`] if called while unattached, otherwise
    /// render target failures.
    pub fn on_viewport_changed(&mut self, viewport: Viewport) -> Result<ReconcileStats> {
        let visible = viewport.visible_rows(self.factory.metrics());
        self.reconcile(visible)
    }

    /// Reconcile against the target's current viewport.
    ///
    /// # Errors
    /// Same as [`Engine::on_viewport_changed`].
    pub fn refresh(&mut self) -> Result<ReconcileStats> {
        let viewport = self.target().map(|t| t.viewport()).ok_or_else(|| {
            log::debug!("refresh while unattached");
            TobyError::NotAttached
        })?;
        self.on_viewport_changed(viewport)
    }

    /// Make the materialized rows match `visible` plus the preload margin,
    /// then advance the sentinel past the new last row.
    ///
    /// # Errors
    /// Same as [`Engine::on_viewport_changed`].
    pub fn reconcile(&mut self, visible: RowRange) -> Result<ReconcileStats> {
        let Lifecycle::Attached(target) = &mut self.state else {
            log::debug!("viewport notification while unattached");
            return Err(TobyError::NotAttached);
        };
        let stats = self.reconciler.reconcile(
            visible,
            target,
            &self.data,
            &self.factory,
            self.interaction.selected(),
        )?;
        if let Some(wanted) = stats.target {
            self.sentinel
                .ensure_extent(wanted.last, target, self.factory.metrics())?;
        }
        Ok(stats)
    }

    /// Range materialized by the last pass, `None` while unattached.
    pub fn materialized_range(&self) -> Option<RowRange> {
        self.reconciler.materialized()
    }

    /// Row indices currently materialized, ascending.
    pub fn materialized_rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.reconciler.rows()
    }

    /// Live row representation for `row`.
    pub fn row(&self, row: u32) -> Option<&RowHandle<T::Row, T::Cell>> {
        self.reconciler.get(row)
    }

    /// Row the sentinel sits at, `None` while unattached.
    pub fn sentinel_row(&self) -> Option<u32> {
        self.sentinel.position()
    }

    /// Current value of a cell, queried from the data source.
    pub fn cell_value(&self, row: u32, col: u32) -> CellValue {
        self.data.get_item(row, col)
    }

    pub fn hovered(&self) -> Option<CellCoord> {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> Option<CellCoord> {
        self.interaction.selected()
    }

    /// Apply a pointer event delivered by the render target.
    ///
    /// # Errors
    /// [`TobyError::NotAttached`] if called while unattached.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Enter { row, col } => self.pointer_enter(row, col),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::Click { row, col } => self.click(row, col),
        }
    }

    /// Record the hovered cell and show its current value in the status line.
    ///
    /// # Errors
    /// [`TobyError::NotAttached`] if called while unattached.
    pub fn pointer_enter(&mut self, row: u32, col: u32) -> Result<()> {
        let Lifecycle::Attached(target) = &mut self.state else {
            return Err(TobyError::NotAttached);
        };
        let coord = CellCoord::new(row, col);
        self.interaction.enter(coord);
        let value = self.data.get_item(row, col);
        target.set_status(&hover_status(coord, &value));
        Ok(())
    }

    /// Clear the hovered cell and the status line.
    ///
    /// # Errors
    /// [`TobyError::NotAttached`] if called while unattached.
    pub fn pointer_leave(&mut self) -> Result<()> {
        let Lifecycle::Attached(target) = &mut self.state else {
            return Err(TobyError::NotAttached);
        };
        self.interaction.leave();
        target.set_status("");
        Ok(())
    }

    /// Toggle selection on a cell, clearing any other selected cell.
    ///
    /// # Errors
    /// [`TobyError::NotAttached`] if called while unattached.
    pub fn click(&mut self, row: u32, col: u32) -> Result<()> {
        let Lifecycle::Attached(target) = &mut self.state else {
            return Err(TobyError::NotAttached);
        };
        let change = self.interaction.click(CellCoord::new(row, col));
        // Cells outside the window pick up the marker when they are created
        for (coord, selected) in [(change.deselect, false), (change.select, true)] {
            let Some(coord) = coord else {
                continue;
            };
            if let Some(cell) = self
                .reconciler
                .get(coord.row)
                .and_then(|handle| handle.cell(coord.col))
            {
                target.set_selected(cell, selected);
            }
        }
        Ok(())
    }
}
