//! Keys and payload encoding for the extension's key-value store.
//!
//! Stroke collections are stored as JSON text under a per-conversation key;
//! the enabled flag is a single boolean under a fixed key. Decoding is
//! tolerant: anything that is not a valid collection reads back as empty.

use crate::Stroke;

#[cfg(test)]
#[path = "storage_format_test.rs"]
mod storage_format_test;

pub const KEY_PREFIX: &str = "marginalia";
pub const ENABLED_KEY: &str = "marginalia:enabled";

/// Stable storage key for the conversation at `host` + `path`.
///
/// Recognizes the `/c/<id>` conversation route; any other path is used
/// verbatim as the identifier, so a key is always producible and the same
/// location always resolves to the same key.
pub fn conversation_key(host: &str, path: &str) -> String {
    let id = conversation_id(path).unwrap_or(path);
    format!("{KEY_PREFIX}:{host}:{id}")
}

fn conversation_id(path: &str) -> Option<&str> {
    let mut parts = path.trim_matches('/').split('/');
    if parts.next()? != "c" {
        return None;
    }
    let id = parts.next()?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

pub fn encode_strokes(strokes: &[Stroke]) -> String {
    serde_json::to_string(strokes).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a persisted collection, sanitizing each stroke. Malformed text
/// and strokes with no surviving points are dropped rather than surfaced.
pub fn decode_strokes(text: &str) -> Vec<Stroke> {
    let Ok(strokes) = serde_json::from_str::<Vec<Stroke>>(text) else {
        return Vec::new();
    };
    strokes.into_iter().filter_map(Stroke::sanitized).collect()
}
