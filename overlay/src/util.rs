use std::cell::Cell;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// A cancellable delayed action: re-scheduling before the delay elapses
/// cancels the earlier timer, so bursts of notifications (e.g. mutation
/// records while messages stream in) coalesce into a single run.
pub struct Debounce {
    window: Window,
    delay_ms: i32,
    pending: Cell<Option<i32>>,
    action: Closure<dyn FnMut()>,
}

impl Debounce {
    pub fn new(window: Window, delay_ms: i32, action: Closure<dyn FnMut()>) -> Self {
        Self {
            window,
            delay_ms,
            pending: Cell::new(None),
            action,
        }
    }

    pub fn schedule(&self) {
        self.cancel();
        if let Ok(handle) = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.action.as_ref().unchecked_ref(),
            self.delay_ms,
        ) {
            self.pending.set(Some(handle));
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}
