use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MutationObserver, PointerEvent, ResizeObserver, Window};

use crate::engine::OverlayCore;
use crate::surface::Surface;
use crate::toolbar::Toolbar;
use crate::util::Debounce;

/// Everything that exists only while the overlay is enabled: the located
/// container, the surface, the toolbar, the capture engine and every
/// listener/observer wired between them. Built on enable, discarded
/// wholesale on disable, so nothing leaks into the page across toggles.
pub struct Session {
    pub container: Element,
    pub surface: Rc<RefCell<Surface>>,
    pub engine: Rc<RefCell<OverlayCore>>,
    pub toolbar: Toolbar,
    pub resize_observer: ResizeObserver,
    pub mutation_observer: MutationObserver,
    pub resize_debounce: Rc<Debounce>,
    pub listeners: Listeners,
}

/// Owned handler closures. Keeping them here (instead of `forget`) is what
/// lets `detach` actually remove them from the page. The pointer handlers
/// are named because removal needs the same closure references; observer
/// callbacks and toolbar handlers only need to outlive their registrations.
pub struct Listeners {
    pub on_pointer_down: Closure<dyn FnMut(PointerEvent)>,
    pub on_pointer_move: Closure<dyn FnMut(PointerEvent)>,
    pub on_pointer_up: Closure<dyn FnMut(PointerEvent)>,
    pub retained: Vec<Closure<dyn FnMut()>>,
}

impl Session {
    /// Synchronously removes every listener and observer, then takes the
    /// surface and toolbar out of the DOM. Listeners must go before the
    /// closures drop; pending persistence writes are left to complete on
    /// their own.
    pub fn detach(self, window: &Window) {
        let Listeners {
            on_pointer_down,
            on_pointer_move,
            on_pointer_up,
            retained,
        } = self.listeners;

        self.resize_observer.disconnect();
        self.mutation_observer.disconnect();
        self.resize_debounce.cancel();

        let canvas = self.surface.borrow().canvas.clone();
        let _ = canvas
            .remove_event_listener_with_callback("pointerdown", on_pointer_down.as_ref().unchecked_ref());
        let _ = canvas
            .remove_event_listener_with_callback("pointermove", on_pointer_move.as_ref().unchecked_ref());
        let _ = window
            .remove_event_listener_with_callback("pointerup", on_pointer_up.as_ref().unchecked_ref());
        let _ = window
            .remove_event_listener_with_callback("pointercancel", on_pointer_up.as_ref().unchecked_ref());

        self.toolbar.mode_button.set_onclick(None);
        self.toolbar.clear_button.set_onclick(None);
        self.toolbar.save_button.set_onclick(None);
        self.toolbar.close_button.set_onclick(None);

        self.surface.borrow().detach();
        self.toolbar.root.remove();
        drop(retained);
    }
}
