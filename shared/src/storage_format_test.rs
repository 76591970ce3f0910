use super::*;
use crate::Point;

fn stroke(color: &str, size: f64, points: &[(f64, f64)]) -> Stroke {
    Stroke {
        color: color.to_string(),
        size,
        points: points.iter().map(|&(x, y)| Point { x, y }).collect(),
    }
}

// =============================================================
// conversation_key
// =============================================================

#[test]
fn key_uses_conversation_id_from_path() {
    let key = conversation_key("chat.example.com", "/c/abc-123");
    assert_eq!(key, "marginalia:chat.example.com:abc-123");
}

#[test]
fn key_ignores_trailing_path_segments() {
    let key = conversation_key("chat.example.com", "/c/abc-123/extra/bits");
    assert_eq!(key, "marginalia:chat.example.com:abc-123");
}

#[test]
fn key_falls_back_to_full_path() {
    let key = conversation_key("chat.example.com", "/settings/profile");
    assert_eq!(key, "marginalia:chat.example.com:/settings/profile");
}

#[test]
fn key_falls_back_when_id_segment_missing() {
    assert_eq!(
        conversation_key("chat.example.com", "/c/"),
        "marginalia:chat.example.com:/c/"
    );
    assert_eq!(
        conversation_key("chat.example.com", "/"),
        "marginalia:chat.example.com:/"
    );
}

#[test]
fn key_is_deterministic() {
    let a = conversation_key("chat.example.com", "/c/xyz");
    let b = conversation_key("chat.example.com", "/c/xyz");
    assert_eq!(a, b);
}

#[test]
fn keys_differ_per_conversation_and_host() {
    let k1 = conversation_key("chat.example.com", "/c/one");
    let k2 = conversation_key("chat.example.com", "/c/two");
    let k3 = conversation_key("other.example.com", "/c/one");
    assert_ne!(k1, k2);
    assert_ne!(k1, k3);
    assert_ne!(k2, k3);
}

// =============================================================
// encode / decode
// =============================================================

#[test]
fn round_trip_preserves_collection() {
    let strokes = vec![
        stroke("#102030", 4.0, &[(1.0, 2.0), (3.0, 4.0)]),
        stroke("#ff6b6b", 12.5, &[(50.0, 1500.0)]),
    ];
    let decoded = decode_strokes(&encode_strokes(&strokes));
    assert_eq!(decoded, strokes);
}

#[test]
fn round_trip_preserves_order() {
    let strokes = vec![
        stroke("#000000", 1.0, &[(0.0, 0.0)]),
        stroke("#111111", 2.0, &[(1.0, 1.0)]),
        stroke("#222222", 3.0, &[(2.0, 2.0)]),
    ];
    let decoded = decode_strokes(&encode_strokes(&strokes));
    let colors: Vec<&str> = decoded.iter().map(|s| s.color.as_str()).collect();
    assert_eq!(colors, ["#000000", "#111111", "#222222"]);
}

#[test]
fn decode_malformed_text_yields_empty() {
    assert!(decode_strokes("").is_empty());
    assert!(decode_strokes("not json").is_empty());
    assert!(decode_strokes("{\"strokes\":true}").is_empty());
    assert!(decode_strokes("42").is_empty());
}

#[test]
fn decode_drops_empty_strokes() {
    let text = r##"[
        {"color":"#123456","size":3.0,"points":[]},
        {"color":"#abcdef","size":5.0,"points":[{"x":1.0,"y":2.0}]}
    ]"##;
    let decoded = decode_strokes(text);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].color, "#abcdef");
}

#[test]
fn decode_sanitizes_size_and_color() {
    let text = r#"[{"color":"","size":1e9,"points":[{"x":0.0,"y":0.0}]}]"#;
    let decoded = decode_strokes(text);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].color, crate::DEFAULT_COLOR);
    assert_eq!(decoded[0].size, crate::MAX_SIZE);
}

#[test]
fn encode_empty_collection() {
    assert_eq!(encode_strokes(&[]), "[]");
    assert!(decode_strokes("[]").is_empty());
}
