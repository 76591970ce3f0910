//! Bridge to the extension host APIs (`chrome.storage.local`,
//! `chrome.runtime.onMessage`), reached through reflection so the overlay
//! degrades gracefully when loaded outside an extension context.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn api_object(path: &[&str]) -> Option<Object> {
    let mut current: JsValue = js_sys::global().into();
    for segment in path {
        current = Reflect::get(&current, &JsValue::from_str(segment)).ok()?;
    }
    current.dyn_into::<Object>().ok()
}

fn method(target: &Object, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Reads one key from `chrome.storage.local`. Absent key, missing API and
/// rejected promise all come back as `None`.
pub async fn storage_get(key: &str) -> Option<JsValue> {
    let local = api_object(&["chrome", "storage", "local"])?;
    let get = method(&local, "get")?;
    let promise: Promise = get
        .call1(&local, &JsValue::from_str(key))
        .ok()?
        .dyn_into()
        .ok()?;
    let result = JsFuture::from(promise).await.ok()?;
    let value = Reflect::get(&result, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Writes one key to `chrome.storage.local`, replacing the stored value
/// wholesale.
pub async fn storage_set(key: &str, value: &JsValue) -> Result<(), JsValue> {
    let local = api_object(&["chrome", "storage", "local"])
        .ok_or_else(|| JsValue::from_str("chrome.storage.local unavailable"))?;
    let set = method(&local, "set")
        .ok_or_else(|| JsValue::from_str("chrome.storage.local.set unavailable"))?;
    let items = Object::new();
    Reflect::set(&items, &JsValue::from_str(key), value)?;
    let promise: Promise = set.call1(&local, &items)?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Subscribes to `chrome.runtime.onMessage`. Returns whether the control
/// channel exists; without it the overlay still works, it just cannot be
/// toggled from the popup.
pub fn add_message_listener(listener: &Closure<dyn FnMut(JsValue, JsValue, Function)>) -> bool {
    let Some(on_message) = api_object(&["chrome", "runtime", "onMessage"]) else {
        return false;
    };
    let Some(add) = method(&on_message, "addListener") else {
        return false;
    };
    add.call1(&on_message, listener.as_ref()).is_ok()
}
