use super::*;

fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

fn pressed_core() -> OverlayCore {
    let mut core = OverlayCore::new();
    assert!(core.press(point(10.0, 20.0)).is_some());
    core
}

// =============================================================
// press
// =============================================================

#[test]
fn press_opens_stroke_and_returns_dot() {
    let mut core = OverlayCore::new();
    core.brush = Brush {
        color: "#123456".to_string(),
        size: 9.0,
    };
    let cmd = core.press(point(3.0, 4.0));
    assert_eq!(
        cmd,
        Some(RenderCmd::Dot {
            center: point(3.0, 4.0),
            color: "#123456".to_string(),
            size: 9.0,
        })
    );
    assert!(core.is_drawing());
    assert!(core.strokes.is_empty());
}

#[test]
fn press_while_drawing_is_ignored() {
    let mut core = pressed_core();
    assert!(core.press(point(50.0, 50.0)).is_none());
    let CapturePhase::Drawing(stroke) = &core.phase else {
        panic!("expected in-progress stroke");
    };
    assert_eq!(stroke.points.len(), 1);
}

#[test]
fn press_sanitizes_brush() {
    let mut core = OverlayCore::new();
    core.brush = Brush {
        color: String::new(),
        size: f64::NAN,
    };
    core.press(point(0.0, 0.0));
    assert!(core.release());
    assert_eq!(core.strokes[0].color, marginalia_shared::DEFAULT_COLOR);
    assert_eq!(core.strokes[0].size, marginalia_shared::DEFAULT_SIZE);
}

#[test]
fn press_rejects_non_finite_point() {
    let mut core = OverlayCore::new();
    assert!(core.press(point(f64::NAN, 1.0)).is_none());
    assert!(!core.is_drawing());
}

// =============================================================
// motion
// =============================================================

#[test]
fn motion_appends_and_returns_newest_segment() {
    let mut core = pressed_core();
    let cmd = core.motion(point(11.0, 21.0));
    assert_eq!(
        cmd,
        Some(RenderCmd::Segment {
            from: point(10.0, 20.0),
            to: point(11.0, 21.0),
            color: core.brush.color.clone(),
            size: core.brush.size,
        })
    );
    let cmd = core.motion(point(12.0, 22.0));
    assert!(matches!(
        cmd,
        Some(RenderCmd::Segment { from, to, .. }) if from == point(11.0, 21.0) && to == point(12.0, 22.0)
    ));
}

#[test]
fn motion_without_press_is_ignored() {
    let mut core = OverlayCore::new();
    assert!(core.motion(point(1.0, 1.0)).is_none());
    assert!(core.strokes.is_empty());
}

#[test]
fn stationary_motion_renders_a_dot() {
    let mut core = pressed_core();
    let cmd = core.motion(point(10.0, 20.0));
    assert!(matches!(cmd, Some(RenderCmd::Dot { .. })));
}

// =============================================================
// release / commit atomicity
// =============================================================

#[test]
fn press_n_moves_release_commits_one_stroke_with_n_plus_one_points() {
    let mut core = pressed_core();
    for step in 1..=5 {
        core.motion(point(10.0 + step as f64, 20.0));
    }
    assert!(core.release());
    assert_eq!(core.strokes.len(), 1);
    assert_eq!(core.strokes[0].points.len(), 6);
    assert!(!core.is_drawing());
}

#[test]
fn press_release_without_moves_commits_one_point_stroke() {
    let mut core = pressed_core();
    assert!(core.release());
    assert_eq!(core.strokes.len(), 1);
    assert_eq!(core.strokes[0].points, vec![point(10.0, 20.0)]);
}

#[test]
fn release_without_press_is_a_noop() {
    let mut core = OverlayCore::new();
    assert!(!core.release());
    assert!(core.strokes.is_empty());
}

#[test]
fn commits_preserve_z_order() {
    let mut core = OverlayCore::new();
    core.brush.color = "#000001".to_string();
    core.press(point(0.0, 0.0));
    core.release();
    core.brush.color = "#000002".to_string();
    core.press(point(1.0, 1.0));
    core.release();
    let colors: Vec<&str> = core.strokes.iter().map(|s| s.color.as_str()).collect();
    assert_eq!(colors, ["#000001", "#000002"]);
}

// =============================================================
// mode gating
// =============================================================

#[test]
fn disabled_draw_mode_swallows_full_gesture() {
    let mut core = OverlayCore::new();
    core.set_draw_enabled(false);
    assert!(core.press(point(5.0, 5.0)).is_none());
    assert!(core.motion(point(6.0, 6.0)).is_none());
    assert!(!core.release());
    assert!(core.strokes.is_empty());
}

#[test]
fn disabling_mid_stroke_still_commits_on_release() {
    let mut core = pressed_core();
    core.motion(point(11.0, 21.0));
    core.set_draw_enabled(false);
    assert!(core.release());
    assert_eq!(core.strokes.len(), 1);
}

// =============================================================
// clear / adopt
// =============================================================

#[test]
fn clear_empties_collection_and_phase() {
    let mut core = pressed_core();
    core.release();
    core.press(point(0.0, 0.0));
    core.clear();
    assert!(core.strokes.is_empty());
    assert!(!core.is_drawing());
    assert!(!core.release());
}

#[test]
fn adopt_replaces_collection_wholesale() {
    let mut core = pressed_core();
    core.release();
    core.adopt(vec![Stroke {
        color: "#abcdef".to_string(),
        size: 2.0,
        points: vec![point(7.0, 7.0)],
    }]);
    assert_eq!(core.strokes.len(), 1);
    assert_eq!(core.strokes[0].color, "#abcdef");
}
