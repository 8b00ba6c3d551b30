//! Render targets for the row window.
//!
//! - `target`: the `RenderTarget` trait and slot placements
//! - `memory`: headless grid used by tests, the CLI and benches
//! - `dom`: browser DOM backend (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod dom;
mod memory;
mod target;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomHandlers, DomTarget};
pub use memory::{CellId, MemoryCell, MemoryRow, MemoryTarget, RowId};
pub use target::{CellPlacement, RenderTarget, RowPlacement};
