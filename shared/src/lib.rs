use serde::{Deserialize, Serialize};

pub mod storage_format;


pub const DEFAULT_COLOR: &str = "#ff6b6b";
pub const DEFAULT_SIZE: f64 = 6.0;
pub const MIN_SIZE: f64 = 1.0;
pub const MAX_SIZE: f64 = 80.0;

/// A position in the drawing surface's content space: origin at the scroll
/// container's content top-left, independent of the current scroll offset.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn sanitize(self) -> Option<Self> {
        if self.x.is_finite() && self.y.is_finite() {
            Some(self)
        } else {
            None
        }
    }
}

/// One committed freehand gesture. Insertion order in a collection is
/// z-order; a stroke never carries zero points once persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub size: f64,
    pub points: Vec<Point>,
}

impl Stroke {
    /// Drops non-finite points and clamps color/size to the brush range.
    /// Returns `None` when no points survive.
    pub fn sanitized(mut self) -> Option<Self> {
        self.points = self.points.into_iter().filter_map(Point::sanitize).collect();
        if self.points.is_empty() {
            return None;
        }
        self.color = sanitize_color(self.color);
        self.size = sanitize_size(self.size);
        Some(self)
    }
}

pub fn sanitize_color(mut color: String) -> String {
    if color.is_empty() {
        return DEFAULT_COLOR.to_string();
    }
    if color.len() > 32 {
        color.truncate(32);
    }
    color
}

pub fn sanitize_size(size: f64) -> f64 {
    let size = if size.is_finite() { size } else { DEFAULT_SIZE };
    size.max(MIN_SIZE).min(MAX_SIZE)
}

/// Control protocol between the popup and the overlay content script.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type")]
pub enum ControlMessage {
    #[serde(rename = "SET_ENABLED")]
    SetEnabled { enabled: bool },
    #[serde(rename = "ATTACH_INSIDE_CHAT")]
    AttachInsideChat,
    #[serde(rename = "PING")]
    Ping,
}

/// Acknowledgment returned for every delivered control message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Ack {
    pub ok: bool,
}
