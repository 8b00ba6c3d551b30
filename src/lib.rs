//! toby - windowed table rendering
//!
//! Renders an arbitrarily long table inside a scroll container by keeping
//! only the visible rows (plus a preload margin) alive:
//! - Fixed-height row geometry and visible range computation
//! - Incremental reconciliation that recycles rows still in range
//! - A scroll sentinel that grows the scrollable extent as the user scrolls
//! - Hover status and single-cell selection
//! - Pluggable render targets: browser DOM (wasm32) or headless memory grid
//!
//! # Usage (Rust)
//!
//! ```
//! use std::rc::Rc;
//! use toby::{ColumnSet, DataProvider, Dataset, Engine, EngineConfig, MemoryTarget, Viewport};
//!
//! let dataset = Dataset::from_json(r#"[{"id": "0", "proper": "Sol"}]"#).unwrap();
//! let provider = DataProvider::with_columns(Rc::new(dataset), ColumnSet::All);
//! let mut engine = Engine::new(provider, EngineConfig::default());
//! engine.attach_to(MemoryTarget::new(Viewport::new(0.0, 310.0))).unwrap();
//! assert_eq!(engine.materialized_rows().count(), 16);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TobyView } from 'toby';
//! await init();
//! const view = new TobyView(datasetJson, columns);
//! view.attachTo(document.getElementById('toby'), document.getElementById('status'));
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod layout;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::EngineConfig;
pub use data::{CellValue, ColumnSet, DataProvider, DataSource, Dataset};
pub use engine::{CellCoord, Engine, PointerEvent, ReconcileStats};
pub use error::{Result, TobyError};
pub use layout::{visible_range, GridMetrics, RowRange, Viewport};
pub use render::{MemoryTarget, RenderTarget};

#[cfg(target_arch = "wasm32")]
pub use viewer::TobyView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
