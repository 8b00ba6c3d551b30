//! Scroll, resize and pointer callbacks for `TobyView`.
//!
//! The callbacks hold a weak reference so the DOM listeners never keep the
//! engine alive on their own.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::data::DataProvider;
use crate::engine::{Engine, PointerEvent};
use crate::error::Result;
use crate::render::DomTarget;

type EngineCell = RefCell<Engine<DataProvider, DomTarget>>;

/// Run `f` on the engine unless it is gone or already borrowed.
///
/// A borrow conflict means a pass is already running; the next notification
/// will see the latest viewport anyway.
fn with_engine<F>(weak: &Weak<EngineCell>, f: F)
where
    F: FnOnce(&mut Engine<DataProvider, DomTarget>) -> Result<()>,
{
    let Some(engine) = weak.upgrade() else {
        return;
    };
    let Ok(mut engine) = engine.try_borrow_mut() else {
        log::debug!("engine busy, dropping notification");
        return;
    };
    if let Err(e) = f(&mut *engine) {
        log::warn!("{e}");
    }
}

pub(crate) fn viewport_handler(weak: Weak<EngineCell>) -> Rc<dyn Fn()> {
    Rc::new(move || with_engine(&weak, |engine| engine.refresh().map(|_| ())))
}

pub(crate) fn pointer_handler(weak: Weak<EngineCell>) -> Rc<dyn Fn(PointerEvent)> {
    Rc::new(move |event| with_engine(&weak, |engine| engine.handle_pointer(event)))
}
