//! Browser entry point for the row window.
//!
//! This module provides the WASM-exported `TobyView` struct that handles:
//! - Loading a JSON dataset and choosing the display columns
//! - Attaching the engine to a scroll container (and optional status element)
//! - Forwarding scroll, resize and pointer events to the engine
//!
//! Listeners are installed on attach and removed on destroy, so no engine work
//! happens after `destroy()` returns.

mod console;
mod events;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::EngineConfig;
use crate::data::{ColumnSet, DataProvider, Dataset};
use crate::engine::{CellCoord, Engine};
use crate::layout::RowRange;
use crate::render::{DomHandlers, DomTarget};

pub(crate) type SharedEngine = Rc<RefCell<Engine<DataProvider, DomTarget>>>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewStats {
    attached: bool,
    materialized: Option<RowRange>,
    sentinel_row: Option<u32>,
    hovered: Option<CellCoord>,
    selected: Option<CellCoord>,
}

/// Windowed table bound to a DOM scroll container
#[wasm_bindgen]
pub struct TobyView {
    engine: SharedEngine,
}

#[wasm_bindgen]
impl TobyView {
    /// Create a view over `dataset_json` (a JSON array of flat objects).
    ///
    /// `columns` selects the displayed columns by name; names starting with
    /// `formula_` are computed. When omitted, the first ten dataset columns
    /// plus three formula columns are shown.
    #[wasm_bindgen(constructor)]
    pub fn new(dataset_json: &str, columns: Option<Vec<String>>) -> Result<TobyView, JsValue> {
        Self::with_config(dataset_json, columns, None)
    }

    /// Same as the constructor with an engine configuration JSON object.
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(
        dataset_json: &str,
        columns: Option<Vec<String>>,
        config_json: Option<String>,
    ) -> Result<TobyView, JsValue> {
        console_error_panic_hook::set_once();
        console::init();

        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json)?,
            None => EngineConfig::default(),
        };
        let dataset = Rc::new(Dataset::from_json(dataset_json)?);
        let provider = match columns {
            Some(columns) => DataProvider::new(dataset, columns),
            None => DataProvider::with_columns(dataset, ColumnSet::DEMO),
        };

        Ok(TobyView {
            engine: Rc::new(RefCell::new(Engine::new(provider, config))),
        })
    }

    /// Column names offered by a dataset, in document order.
    #[wasm_bindgen(js_name = "availableColumns")]
    pub fn available_columns(dataset_json: &str) -> Result<Vec<String>, JsValue> {
        let dataset = Dataset::from_json(dataset_json)?;
        Ok(dataset.available_columns().to_vec())
    }

    /// Start managing `container`; hover feedback goes to `status` if given.
    ///
    /// Returns `false` (with a console warning) if the view is already
    /// attached. Throws only if the DOM refuses to create elements.
    #[wasm_bindgen(js_name = "attachTo")]
    pub fn attach_to(
        &self,
        container: HtmlElement,
        status: Option<HtmlElement>,
    ) -> Result<bool, JsValue> {
        if self.engine.borrow().is_attached() {
            log::warn!("attachTo called on an attached view; ignoring");
            return Ok(false);
        }
        let handlers = DomHandlers {
            on_viewport: events::viewport_handler(Rc::downgrade(&self.engine)),
            on_pointer: events::pointer_handler(Rc::downgrade(&self.engine)),
        };
        let target = DomTarget::new(container, status, handlers)?;
        let result = self.engine.borrow_mut().attach_to(target);
        match result {
            Ok(_) => Ok(true),
            Err(e) if e.is_lifecycle() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Stop managing the container and remove everything rendered into it.
    ///
    /// Returns `false` (with a console warning) if the view is not attached.
    pub fn destroy(&self) -> bool {
        self.engine.borrow_mut().destroy().is_ok()
    }

    /// Reconcile against the container's current scroll position and size.
    pub fn refresh(&self) -> Result<(), JsValue> {
        let result = self.engine.borrow_mut().refresh();
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_lifecycle() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Snapshot of the engine state for debugging.
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let engine = self.engine.borrow();
        let stats = ViewStats {
            attached: engine.is_attached(),
            materialized: engine.materialized_range(),
            sentinel_row: engine.sentinel_row(),
            hovered: engine.hovered(),
            selected: engine.selected(),
        };
        serde_wasm_bindgen::to_value(&stats)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}
