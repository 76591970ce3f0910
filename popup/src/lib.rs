//! Control panel for the overlay: a storage-backed on/off toggle and a
//! forced re-attach button. Before messaging the active tab it probes for
//! the content script and falls back to injecting it once; failures are
//! logged, never fatal, since the page may simply not be a chat.

mod chrome;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, HtmlButtonElement};

use marginalia_shared::storage_format::ENABLED_KEY;
use marginalia_shared::ControlMessage;

/// File name the overlay ships under in the packaged extension.
const CONTENT_SCRIPT_FILE: &str = "content_script.js";

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;

    let toggle_button: HtmlButtonElement = get_element(&document, "toggle")?;
    let attach_button: HtmlButtonElement = get_element(&document, "attach")?;

    {
        let toggle_button = toggle_button.clone();
        wasm_bindgen_futures::spawn_local(async move {
            sync_toggle(&toggle_button, chrome::storage_get_bool(ENABLED_KEY).await);
        });
    }

    {
        let toggle_button_cb = toggle_button.clone();
        let ontoggle = Closure::<dyn FnMut()>::new(move || {
            let toggle_button = toggle_button_cb.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let enabled = !chrome::storage_get_bool(ENABLED_KEY).await;
                if let Err(error) = chrome::storage_set_bool(ENABLED_KEY, enabled).await {
                    console::warn_1(&format!("marginalia: flag write failed: {error:?}").into());
                }
                sync_toggle(&toggle_button, enabled);
                if let Err(error) = send_to_active_tab(&ControlMessage::SetEnabled { enabled }).await
                {
                    console::warn_1(&format!("marginalia: toggle message failed: {error:?}").into());
                }
            });
        });
        toggle_button.set_onclick(Some(ontoggle.as_ref().unchecked_ref()));
        ontoggle.forget();
    }

    {
        let onattach = Closure::<dyn FnMut()>::new(move || {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(error) = send_to_active_tab(&ControlMessage::AttachInsideChat).await {
                    console::warn_1(&format!("marginalia: attach message failed: {error:?}").into());
                }
            });
        });
        attach_button.set_onclick(Some(onattach.as_ref().unchecked_ref()));
        onattach.forget();
    }

    Ok(())
}

fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

fn sync_toggle(button: &HtmlButtonElement, enabled: bool) {
    button.set_text_content(Some(if enabled { "On" } else { "Off" }));
    button.set_class_name(if enabled { "on" } else { "off" });
}

/// Sends one control message to the active tab, making sure the content
/// script is actually there first.
async fn send_to_active_tab(message: &ControlMessage) -> Result<JsValue, JsValue> {
    let tab = chrome::active_tab()
        .await
        .ok_or_else(|| JsValue::from_str("no active tab"))?;
    let url = chrome::tab_url(&tab).unwrap_or_default();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        // chrome:// and extension pages cannot host the overlay.
        return Err(JsValue::from_str("active tab is not an http(s) page"));
    }
    let tab_id = chrome::tab_id(&tab).ok_or_else(|| JsValue::from_str("active tab has no id"))?;

    ensure_content_script(tab_id).await?;
    chrome::send_tab_message(tab_id, &to_js(message)?).await
}

/// Probes with a ping; on silence, injects the content script once and
/// probes again.
async fn ensure_content_script(tab_id: f64) -> Result<(), JsValue> {
    if ping(tab_id).await {
        return Ok(());
    }
    console::log_1(&"marginalia: content script not detected, injecting".into());
    chrome::inject_script(tab_id, CONTENT_SCRIPT_FILE).await?;
    if ping(tab_id).await {
        Ok(())
    } else {
        Err(JsValue::from_str("content script unavailable after injection"))
    }
}

async fn ping(tab_id: f64) -> bool {
    match to_js(&ControlMessage::Ping) {
        Ok(message) => chrome::send_tab_message(tab_id, &message).await.is_ok(),
        Err(_) => false,
    }
}

fn to_js(message: &ControlMessage) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(message)
        .map_err(|error| JsValue::from_str(&format!("encode failed: {error}")))?;
    js_sys::JSON::parse(&text)
}
