//! Loading, saving and exporting the stroke collection.
//!
//! Saves are fire-and-forget and always carry the whole current collection,
//! so overlapping completions converge on the final state. A failed write
//! costs at most that one write and never disturbs capture.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, HtmlAnchorElement, Window};

use marginalia_shared::storage_format::{
    conversation_key, decode_strokes, encode_strokes, ENABLED_KEY,
};
use marginalia_shared::Stroke;

use crate::ext;

pub const EXPORT_FILE_NAME: &str = "doodle.png";

/// Storage key for the conversation currently shown by the page.
pub fn current_key(window: &Window) -> String {
    let location = window.location();
    let host = location.hostname().unwrap_or_default();
    let path = location.pathname().unwrap_or_default();
    conversation_key(&host, &path)
}

/// Returns the persisted collection for `key`; a key never written or a
/// malformed stored value reads as an empty collection, never an error.
pub async fn load_strokes(key: &str) -> Vec<Stroke> {
    match ext::storage_get(key).await {
        Some(value) => value
            .as_string()
            .map(|text| decode_strokes(&text))
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

pub fn save_strokes(key: &str, strokes: &[Stroke]) {
    let key = key.to_string();
    let payload = encode_strokes(strokes);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(error) = ext::storage_set(&key, &JsValue::from_str(&payload)).await {
            console::warn_1(&format!("marginalia: stroke save failed: {error:?}").into());
        }
    });
}

pub async fn load_enabled() -> bool {
    ext::storage_get(ENABLED_KEY)
        .await
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

pub fn save_enabled(enabled: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(error) = ext::storage_set(ENABLED_KEY, &JsValue::from_bool(enabled)).await {
            console::warn_1(&format!("marginalia: enabled flag save failed: {error:?}").into());
        }
    });
}

/// Downloads the current surface pixels as a lossless PNG.
pub fn download_png(document: &Document, data_url: &str) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(data_url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();
    Ok(())
}
