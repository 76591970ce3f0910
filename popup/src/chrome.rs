//! Reflection bridge to the extension APIs the popup needs:
//! `chrome.storage.local`, `chrome.tabs` and `chrome.scripting`.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
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

async fn call_promise(target: &Object, name: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let function = method(target, name)
        .ok_or_else(|| JsValue::from_str(&format!("chrome API method {name} unavailable")))?;
    let raw = match args {
        [] => function.call0(target)?,
        [a] => function.call1(target, a)?,
        [a, b] => function.call2(target, a, b)?,
        _ => return Err(JsValue::from_str("unsupported arity")),
    };
    let promise: Promise = raw.dyn_into()?;
    JsFuture::from(promise).await
}

pub async fn storage_get_bool(key: &str) -> bool {
    let Some(local) = api_object(&["chrome", "storage", "local"]) else {
        return false;
    };
    let Ok(result) = call_promise(&local, "get", &[&JsValue::from_str(key)]).await else {
        return false;
    };
    Reflect::get(&result, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

pub async fn storage_set_bool(key: &str, value: bool) -> Result<(), JsValue> {
    let local = api_object(&["chrome", "storage", "local"])
        .ok_or_else(|| JsValue::from_str("chrome.storage.local unavailable"))?;
    let items = Object::new();
    Reflect::set(&items, &JsValue::from_str(key), &JsValue::from_bool(value))?;
    call_promise(&local, "set", &[&items]).await?;
    Ok(())
}

/// The active tab of the current window, if any.
pub async fn active_tab() -> Option<JsValue> {
    let tabs = api_object(&["chrome", "tabs"])?;
    let query = js_sys::JSON::parse(r#"{"active":true,"currentWindow":true}"#).ok()?;
    let result = call_promise(&tabs, "query", &[&query]).await.ok()?;
    let list: Array = result.dyn_into().ok()?;
    let tab = list.get(0);
    if tab.is_undefined() {
        None
    } else {
        Some(tab)
    }
}

pub fn tab_id(tab: &JsValue) -> Option<f64> {
    Reflect::get(tab, &JsValue::from_str("id")).ok()?.as_f64()
}

pub fn tab_url(tab: &JsValue) -> Option<String> {
    Reflect::get(tab, &JsValue::from_str("url")).ok()?.as_string()
}

/// Delivers `message` to the content script in `tab_id`; rejects when no
/// receiver is listening there.
pub async fn send_tab_message(tab_id: f64, message: &JsValue) -> Result<JsValue, JsValue> {
    let tabs = api_object(&["chrome", "tabs"])
        .ok_or_else(|| JsValue::from_str("chrome.tabs unavailable"))?;
    call_promise(&tabs, "sendMessage", &[&JsValue::from_f64(tab_id), message]).await
}

/// Injects a content-script file into the tab.
pub async fn inject_script(tab_id: f64, file: &str) -> Result<(), JsValue> {
    let scripting = api_object(&["chrome", "scripting"])
        .ok_or_else(|| JsValue::from_str("chrome.scripting unavailable"))?;
    let target = Object::new();
    Reflect::set(&target, &JsValue::from_str("tabId"), &JsValue::from_f64(tab_id))?;
    let files = Array::new();
    files.push(&JsValue::from_str(file));
    let injection = Object::new();
    Reflect::set(&injection, &JsValue::from_str("target"), &target)?;
    Reflect::set(&injection, &JsValue::from_str("files"), &files)?;
    call_promise(&scripting, "executeScript", &[&injection]).await?;
    Ok(())
}
