//! Browser DOM render target.
//!
//! Rows and cells are absolutely positioned `div`s:
//! `div.row[data-row]` translated vertically inside the scroll container and
//! `div.cell[data-col]` translated horizontally inside the row. Pointer
//! events are delegated to the container, so recycled rows never carry
//! per-element listeners.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, Node};

use super::{CellPlacement, RenderTarget, RowPlacement};
use crate::engine::PointerEvent;
use crate::error::{Result, TobyError};
use crate::layout::Viewport;

/// Callbacks invoked by the DOM listeners installed in [`RenderTarget::subscribe`].
#[derive(Clone)]
pub struct DomHandlers {
    /// Scroll on the container or resize of the window.
    pub on_viewport: Rc<dyn Fn()>,
    /// Delegated pointer activity on a cell.
    pub on_pointer: Rc<dyn Fn(PointerEvent)>,
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>);

/// Render target backed by a scrollable `HtmlElement`.
pub struct DomTarget {
    document: Document,
    container: HtmlElement,
    status: Option<HtmlElement>,
    sentinel: Option<HtmlElement>,
    handlers: DomHandlers,
    listeners: Vec<Listener>,
}

fn scroll_top_f64(element: &HtmlElement) -> f64 {
    js_sys::Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_top()))
}

/// `(row, col)` of the `div.cell` containing `target`, if any.
fn cell_coords(target: Option<EventTarget>) -> Option<(Element, u32, u32)> {
    let element = target?.dyn_into::<Element>().ok()?;
    let cell = element.closest(".cell").ok()??;
    let row = cell.closest(".row").ok()??;
    let col_index = cell.get_attribute("data-col")?.parse().ok()?;
    let row_index = row.get_attribute("data-row")?.parse().ok()?;
    Some((cell, row_index, col_index))
}

impl DomTarget {
    /// Manage `container`, optionally writing hover feedback into `status`.
    ///
    /// # Errors
    /// Returns [`TobyError::Render`] if there is no document to create
    /// elements in.
    pub fn new(
        container: HtmlElement,
        status: Option<HtmlElement>,
        handlers: DomHandlers,
    ) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| TobyError::Render("no document available".to_string()))?;

        // Rows are absolutely positioned against the container
        let style = container.style();
        if style
            .get_property_value("position")
            .unwrap_or_default()
            .is_empty()
        {
            let _ = style.set_property("position", "relative");
        }
        let _ = style.set_property("overflow-y", "auto");

        Ok(Self {
            document,
            container,
            status,
            sentinel: None,
            handlers,
            listeners: Vec::new(),
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn create_div(&self, class: &str) -> Result<HtmlElement> {
        let element = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| TobyError::Render("created element is not an HtmlElement".to_string()))?;
        element.class_list().add_1(class)?;
        Ok(element)
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<()> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push((target, event, closure));
        Ok(())
    }
}

impl RenderTarget for DomTarget {
    type Row = HtmlElement;
    type Cell = HtmlElement;

    fn viewport(&self) -> Viewport {
        Viewport::new(
            scroll_top_f64(&self.container),
            f64::from(self.container.client_height()),
        )
    }

    fn subscribe(&mut self) -> Result<()> {
        let container: EventTarget = self.container.clone().into();

        let on_viewport = Rc::clone(&self.handlers.on_viewport);
        let scroll = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            on_viewport();
        }) as Box<dyn FnMut(web_sys::Event)>);
        self.listen(container.clone(), "scroll", scroll)?;

        if let Some(window) = web_sys::window() {
            let on_viewport = Rc::clone(&self.handlers.on_viewport);
            let resize = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                on_viewport();
            }) as Box<dyn FnMut(web_sys::Event)>);
            self.listen(window.into(), "resize", resize)?;
        }

        let on_pointer = Rc::clone(&self.handlers.on_pointer);
        let over = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some((_, row, col)) = cell_coords(event.target()) {
                on_pointer(PointerEvent::Enter { row, col });
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        self.listen(container.clone(), "mouseover", over)?;

        let on_pointer = Rc::clone(&self.handlers.on_pointer);
        let out = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some((cell, _, _)) = cell_coords(event.target()) else {
                return;
            };
            // Moving between children of the same cell is not a leave
            let related = event
                .dyn_ref::<MouseEvent>()
                .and_then(MouseEvent::related_target);
            let still_inside = related
                .as_ref()
                .and_then(|t| t.dyn_ref::<Node>())
                .is_some_and(|node| cell.contains(Some(node)));
            if !still_inside {
                on_pointer(PointerEvent::Leave);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        self.listen(container.clone(), "mouseout", out)?;

        let on_pointer = Rc::clone(&self.handlers.on_pointer);
        let click = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some((_, row, col)) = cell_coords(event.target()) {
                on_pointer(PointerEvent::Click { row, col });
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        self.listen(container, "click", click)?;

        Ok(())
    }

    fn unsubscribe(&mut self) {
        for (target, event, closure) in self.listeners.drain(..) {
            let _ =
                target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }

    fn create_row_slot(&mut self, placement: RowPlacement) -> Result<HtmlElement> {
        let row = self.create_div("row")?;
        row.set_attribute("data-row", &placement.row.to_string())?;
        let style = row.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("left", "0");
        let _ = style.set_property("width", &format!("{}px", placement.width));
        let _ = style.set_property("height", &format!("{}px", placement.height));
        let _ = style.set_property(
            "transform",
            &format!("translateY({}px)", placement.offset_y),
        );
        Ok(row)
    }

    fn create_cell_slot(
        &mut self,
        row: &HtmlElement,
        placement: CellPlacement,
    ) -> Result<HtmlElement> {
        let cell = self.create_div("cell")?;
        cell.set_attribute("data-col", &placement.col.to_string())?;
        let style = cell.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("width", &format!("{}px", placement.width));
        let _ = style.set_property("height", &format!("{}px", placement.height));
        let _ = style.set_property(
            "transform",
            &format!("translateX({}px)", placement.offset_x),
        );
        row.append_child(&cell)?;
        Ok(cell)
    }

    fn set_content(&mut self, cell: &HtmlElement, text: &str) {
        cell.set_text_content(Some(text));
    }

    fn set_selected(&mut self, cell: &HtmlElement, selected: bool) {
        let _ = cell.class_list().toggle_with_force("selected", selected);
    }

    fn append_row(&mut self, row: &HtmlElement) -> Result<()> {
        self.container.append_child(row)?;
        Ok(())
    }

    fn remove_row(&mut self, row: HtmlElement) {
        row.remove();
    }

    fn place_sentinel(&mut self, offset_y: f32) -> Result<()> {
        let sentinel = match self.sentinel.take() {
            Some(sentinel) => sentinel,
            None => {
                let sentinel = self.create_div("sentinel")?;
                let style = sentinel.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("left", "0");
                let _ = style.set_property("width", "0");
                let _ = style.set_property("height", "0");
                self.container.append_child(&sentinel)?;
                sentinel
            }
        };
        let _ = sentinel
            .style()
            .set_property("top", &format!("{offset_y}px"));
        self.sentinel = Some(sentinel);
        Ok(())
    }

    fn set_status(&mut self, text: &str) {
        if let Some(status) = self.status.as_ref() {
            status.set_text_content(Some(text));
        }
    }

    fn clear(&mut self) {
        self.container.set_inner_html("");
        self.sentinel = None;
    }
}

impl Drop for DomTarget {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
