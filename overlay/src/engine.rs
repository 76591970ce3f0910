//! Pointer capture state machine and the in-memory stroke collection.
//!
//! Browser-free so the capture semantics can be tested without a live page:
//! the DOM layer feeds surface-local points in and renders the commands that
//! come back out.

use marginalia_shared::{sanitize_color, sanitize_size, Point, Stroke, DEFAULT_COLOR, DEFAULT_SIZE};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Current tool settings, sampled from the toolbar at pointer-press.
#[derive(Clone, Debug)]
pub struct Brush {
    pub color: String,
    pub size: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            size: DEFAULT_SIZE,
        }
    }
}

/// Capture phase: at most one stroke is in progress at a time. A second
/// press while `Drawing` is ignored rather than starting a parallel stroke.
pub enum CapturePhase {
    Idle,
    Drawing(Stroke),
}

/// Incremental draw request emitted by a capture transition, so live
/// feedback never needs a full redraw.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCmd {
    Dot {
        center: Point,
        color: String,
        size: f64,
    },
    Segment {
        from: Point,
        to: Point,
        color: String,
        size: f64,
    },
}

pub struct OverlayCore {
    /// Committed strokes, insertion order = z-order.
    pub strokes: Vec<Stroke>,
    pub phase: CapturePhase,
    pub brush: Brush,
    /// Gates `press` only; an in-progress stroke still finishes normally.
    pub draw_enabled: bool,
}

impl Default for OverlayCore {
    fn default() -> Self {
        Self {
            strokes: Vec::new(),
            phase: CapturePhase::Idle,
            brush: Brush::default(),
            draw_enabled: true,
        }
    }
}

impl OverlayCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, CapturePhase::Drawing(_))
    }

    /// `Idle -> Drawing`. Opens an in-progress stroke seeded with the press
    /// point and returns the dot to draw for immediate feedback. Returns
    /// `None` when draw mode is off or a stroke is already in progress.
    pub fn press(&mut self, point: Point) -> Option<RenderCmd> {
        if !self.draw_enabled || self.is_drawing() {
            return None;
        }
        let point = point.sanitize()?;
        let color = sanitize_color(self.brush.color.clone());
        let size = sanitize_size(self.brush.size);
        self.phase = CapturePhase::Drawing(Stroke {
            color: color.clone(),
            size,
            points: vec![point],
        });
        Some(RenderCmd::Dot {
            center: point,
            color,
            size,
        })
    }

    /// `Drawing -> Drawing`. Appends the point and returns just the newest
    /// segment to draw.
    pub fn motion(&mut self, point: Point) -> Option<RenderCmd> {
        let point = point.sanitize()?;
        let CapturePhase::Drawing(stroke) = &mut self.phase else {
            return None;
        };
        let last = stroke.points.last().copied();
        stroke.points.push(point);
        let cmd = match last {
            Some(from) if from != point => RenderCmd::Segment {
                from,
                to: point,
                color: stroke.color.clone(),
                size: stroke.size,
            },
            _ => RenderCmd::Dot {
                center: point,
                color: stroke.color.clone(),
                size: stroke.size,
            },
        };
        Some(cmd)
    }

    /// `Drawing -> Idle`. Commits the in-progress stroke to the collection
    /// when it carries at least one point (a press with no moves commits a
    /// one-point stroke). Returns whether a commit happened, in which case
    /// the caller persists the whole collection.
    pub fn release(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, CapturePhase::Idle) {
            CapturePhase::Drawing(stroke) if !stroke.points.is_empty() => {
                self.strokes.push(stroke);
                true
            }
            _ => false,
        }
    }

    pub fn set_draw_enabled(&mut self, enabled: bool) {
        self.draw_enabled = enabled;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.phase = CapturePhase::Idle;
    }

    /// Replaces the collection wholesale, e.g. after a persisted load.
    pub fn adopt(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
        self.phase = CapturePhase::Idle;
    }
}
