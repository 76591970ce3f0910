use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, MutationObserver, MutationObserverInit, PointerEvent, ResizeObserver,
    Window,
};

use marginalia_shared::{sanitize_color, sanitize_size, Ack, ControlMessage};

use crate::dom::{ensure_positioned, event_to_point};
use crate::engine::{Brush, OverlayCore};
use crate::ext;
use crate::locate::find_chat_container;
use crate::persistence;
use crate::render;
use crate::state::{Listeners, Session};
use crate::surface::Surface;
use crate::toolbar;
use crate::util::Debounce;

/// Marker published on `window` so the popup can probe for the content
/// script before messaging it.
const MARKER_GLOBAL: &str = "__MARGINALIA";

/// Mutation bursts (messages streaming in) coalesce for this long before
/// the surface re-measures.
const MUTATION_RESIZE_DELAY_MS: i32 = 50;

type Controller = Rc<RefCell<Option<Session>>>;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let controller: Controller = Rc::new(RefCell::new(None));

    publish_marker(&window, false);

    {
        let controller = controller.clone();
        let window = window.clone();
        let document = document.clone();
        let onmessage = Closure::<dyn FnMut(JsValue, JsValue, Function)>::new(
            move |message: JsValue, _sender: JsValue, send_response: Function| {
                match parse_control_message(&message) {
                    Some(ControlMessage::SetEnabled { enabled }) => {
                        set_enabled(&controller, &window, &document, enabled);
                    }
                    Some(ControlMessage::AttachInsideChat) => {
                        // Forced re-attach: rebuild against a freshly located
                        // container even if a session is already live.
                        if let Some(session) = controller.borrow_mut().take() {
                            session.detach(&window);
                        }
                        set_enabled(&controller, &window, &document, true);
                    }
                    Some(ControlMessage::Ping) | None => {}
                }
                acknowledge(&send_response);
            },
        );
        if !ext::add_message_listener(&onmessage) {
            console::log_1(
                &"marginalia: control channel unavailable, restoring from stored flag only".into(),
            );
        }
        // Lives for the lifetime of the page.
        onmessage.forget();
    }

    {
        let controller = controller.clone();
        let window = window.clone();
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if persistence::load_enabled().await {
                set_enabled(&controller, &window, &document, true);
            }
        });
    }

    Ok(())
}

pub fn set_enabled(controller: &Controller, window: &Window, document: &Document, on: bool) {
    publish_marker(window, on);
    persistence::save_enabled(on);

    if !on {
        if let Some(session) = controller.borrow_mut().take() {
            session.detach(window);
        }
        return;
    }

    let mut slot = controller.borrow_mut();
    if let Some(session) = slot.as_ref() {
        // Already enabled: never stack a second surface, just refresh.
        refresh_session(session, window);
        return;
    }
    match attach_session(controller, window, document) {
        Ok(session) => *slot = Some(session),
        Err(error) => {
            console::error_1(&format!("marginalia: overlay attach failed: {error:?}").into());
        }
    }
}

fn refresh_session(session: &Session, window: &Window) {
    session
        .surface
        .borrow_mut()
        .resize(window, &session.container, &session.engine.borrow().strokes);
    reload_strokes(window.clone(), session.engine.clone(), session.surface.clone());
}

fn reload_strokes(window: Window, engine: Rc<RefCell<OverlayCore>>, surface: Rc<RefCell<Surface>>) {
    wasm_bindgen_futures::spawn_local(async move {
        let key = persistence::current_key(&window);
        let strokes = persistence::load_strokes(&key).await;
        engine.borrow_mut().adopt(strokes);
        let surface = surface.borrow();
        render::redraw(&surface.ctx, &surface.geometry, &engine.borrow().strokes);
    });
}

fn attach_session(
    controller: &Controller,
    window: &Window,
    document: &Document,
) -> Result<Session, JsValue> {
    let container = find_chat_container(window, document)
        .ok_or_else(|| JsValue::from_str("no attach point in document"))?;
    ensure_positioned(window, &container);

    let surface = Rc::new(RefCell::new(Surface::attach(document, &container)?));
    let engine = Rc::new(RefCell::new(OverlayCore::new()));
    let toolbar = toolbar::build(document)?;
    document
        .body()
        .ok_or_else(|| JsValue::from_str("missing document body"))?
        .append_child(&toolbar.root)?;

    let canvas = surface.borrow().canvas.clone();
    surface
        .borrow_mut()
        .resize(window, &container, &engine.borrow().strokes);
    surface.borrow().set_draw_mode(true);
    toolbar::sync_mode_button(&toolbar.mode_button, true);

    // Change detection: immediate on box resize, debounced on subtree
    // mutation.
    let on_container_resize = {
        let window = window.clone();
        let container = container.clone();
        let surface = surface.clone();
        let engine = engine.clone();
        Closure::<dyn FnMut()>::new(move || {
            surface
                .borrow_mut()
                .resize(&window, &container, &engine.borrow().strokes);
        })
    };
    let resize_observer = ResizeObserver::new(on_container_resize.as_ref().unchecked_ref())?;
    resize_observer.observe(&container);

    let resize_debounce = {
        let window_cb = window.clone();
        let container = container.clone();
        let surface = surface.clone();
        let engine = engine.clone();
        let action = Closure::<dyn FnMut()>::new(move || {
            surface
                .borrow_mut()
                .resize(&window_cb, &container, &engine.borrow().strokes);
        });
        Rc::new(Debounce::new(
            window.clone(),
            MUTATION_RESIZE_DELAY_MS,
            action,
        ))
    };
    let on_mutations = {
        let debounce = resize_debounce.clone();
        Closure::<dyn FnMut()>::new(move || debounce.schedule())
    };
    let mutation_observer = MutationObserver::new(on_mutations.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    mutation_observer.observe_with_options(container.as_ref(), &init)?;

    let on_pointer_down = {
        let canvas = canvas.clone();
        let surface = surface.clone();
        let engine = engine.clone();
        let color_input = toolbar.color_input.clone();
        let size_input = toolbar.size_input.clone();
        Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let Some(point) = event_to_point(&canvas, &event) else {
                return;
            };
            let mut engine = engine.borrow_mut();
            engine.brush = Brush {
                color: sanitize_color(color_input.value()),
                size: sanitize_size(size_input.value_as_number()),
            };
            if let Some(cmd) = engine.press(point) {
                event.prevent_default();
                render::draw_cmd(&surface.borrow().ctx, &cmd);
                let _ = canvas.set_pointer_capture(event.pointer_id());
            }
        })
    };
    let on_pointer_move = {
        let canvas = canvas.clone();
        let surface = surface.clone();
        let engine = engine.clone();
        Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut engine = engine.borrow_mut();
            if !engine.is_drawing() {
                return;
            }
            let Some(point) = event_to_point(&canvas, &event) else {
                return;
            };
            if let Some(cmd) = engine.motion(point) {
                render::draw_cmd(&surface.borrow().ctx, &cmd);
            }
        })
    };
    // Release is observed on the window: a fast stroke can end outside the
    // surface and must still commit.
    let on_pointer_up = {
        let window = window.clone();
        let engine = engine.clone();
        Closure::<dyn FnMut(PointerEvent)>::new(move |_event: PointerEvent| {
            let mut engine = engine.borrow_mut();
            if engine.release() {
                persistence::save_strokes(&persistence::current_key(&window), &engine.strokes);
            }
        })
    };
    canvas.add_event_listener_with_callback("pointerdown", on_pointer_down.as_ref().unchecked_ref())?;
    canvas.add_event_listener_with_callback("pointermove", on_pointer_move.as_ref().unchecked_ref())?;
    window.add_event_listener_with_callback("pointerup", on_pointer_up.as_ref().unchecked_ref())?;
    window
        .add_event_listener_with_callback("pointercancel", on_pointer_up.as_ref().unchecked_ref())?;

    let on_mode_click = {
        let engine = engine.clone();
        let surface = surface.clone();
        let mode_button = toolbar.mode_button.clone();
        Closure::<dyn FnMut()>::new(move || {
            let mut engine = engine.borrow_mut();
            let enabled = !engine.draw_enabled;
            engine.set_draw_enabled(enabled);
            surface.borrow().set_draw_mode(enabled);
            toolbar::sync_mode_button(&mode_button, enabled);
        })
    };
    toolbar
        .mode_button
        .set_onclick(Some(on_mode_click.as_ref().unchecked_ref()));

    let on_clear_click = {
        let window = window.clone();
        let engine = engine.clone();
        let surface = surface.clone();
        Closure::<dyn FnMut()>::new(move || {
            let mut engine = engine.borrow_mut();
            engine.clear();
            persistence::save_strokes(&persistence::current_key(&window), &engine.strokes);
            let surface = surface.borrow();
            render::redraw(&surface.ctx, &surface.geometry, &engine.strokes);
        })
    };
    toolbar
        .clear_button
        .set_onclick(Some(on_clear_click.as_ref().unchecked_ref()));

    let on_save_click = {
        let document = document.clone();
        let surface = surface.clone();
        Closure::<dyn FnMut()>::new(move || {
            let exported = surface
                .borrow()
                .to_png_data_url()
                .and_then(|url| persistence::download_png(&document, &url));
            if let Err(error) = exported {
                console::warn_1(&format!("marginalia: PNG export failed: {error:?}").into());
            }
        })
    };
    toolbar
        .save_button
        .set_onclick(Some(on_save_click.as_ref().unchecked_ref()));

    let on_close_click = {
        let controller = controller.clone();
        let window = window.clone();
        let document = document.clone();
        Closure::<dyn FnMut()>::new(move || {
            let controller = controller.clone();
            let window = window.clone();
            let document = document.clone();
            // Deferred so teardown does not free this closure while it is
            // still on the stack.
            wasm_bindgen_futures::spawn_local(async move {
                set_enabled(&controller, &window, &document, false);
            });
        })
    };
    toolbar
        .close_button
        .set_onclick(Some(on_close_click.as_ref().unchecked_ref()));

    reload_strokes(window.clone(), engine.clone(), surface.clone());

    Ok(Session {
        container,
        surface,
        engine,
        toolbar,
        resize_observer,
        mutation_observer,
        resize_debounce,
        listeners: Listeners {
            on_pointer_down,
            on_pointer_move,
            on_pointer_up,
            retained: vec![
                on_container_resize,
                on_mutations,
                on_mode_click,
                on_clear_click,
                on_save_click,
                on_close_click,
            ],
        },
    })
}

fn publish_marker(window: &Window, enabled: bool) {
    let marker = Object::new();
    let _ = Reflect::set(&marker, &JsValue::from_str("loaded"), &JsValue::TRUE);
    let _ = Reflect::set(
        &marker,
        &JsValue::from_str("enabled"),
        &JsValue::from_bool(enabled),
    );
    let _ = Reflect::set(window.as_ref(), &JsValue::from_str(MARKER_GLOBAL), &marker);
}

/// Runtime messages arrive as structured clones; round-tripping through
/// JSON text lets serde do the tag dispatch.
fn parse_control_message(message: &JsValue) -> Option<ControlMessage> {
    let text: JsValue = js_sys::JSON::stringify(message).ok()?.into();
    serde_json::from_str(&text.as_string()?).ok()
}

fn acknowledge(send_response: &Function) {
    let Ok(payload) = serde_json::to_string(&Ack { ok: true }) else {
        return;
    };
    let Ok(ack) = js_sys::JSON::parse(&payload) else {
        return;
    };
    let _ = send_response.call1(&JsValue::NULL, &ack);
}
