use super::*;

// =============================================================
// SurfaceGeometry
// =============================================================

#[test]
fn backing_store_is_content_times_dpr_rounded() {
    let geometry = SurfaceGeometry::new(801.0, 1201.0, 1.5);
    assert_eq!(geometry.device_width(), 1202);
    assert_eq!(geometry.device_height(), 1802);
}

#[test]
fn unit_dpr_keeps_content_dimensions() {
    let geometry = SurfaceGeometry::new(640.0, 480.0, 1.0);
    assert_eq!(geometry.device_width(), 640);
    assert_eq!(geometry.device_height(), 480);
}

#[test]
fn dpr_is_floored_at_one() {
    let geometry = SurfaceGeometry::new(100.0, 100.0, 0.5);
    assert_eq!(geometry.dpr, 1.0);
    assert_eq!(geometry.device_width(), 100);
}

#[test]
fn negative_measurements_clamp_to_zero() {
    let geometry = SurfaceGeometry::new(-4.0, -8.0, 2.0);
    assert_eq!(geometry.content_width, 0.0);
    assert_eq!(geometry.device_height(), 0);
}

#[test]
fn recomputing_with_unchanged_inputs_is_idempotent() {
    let first = SurfaceGeometry::new(900.0, 800.0, 2.0);
    let second = SurfaceGeometry::new(900.0, 800.0, 2.0);
    assert_eq!(first, second);
    assert_eq!(first.device_width(), second.device_width());
    assert_eq!(first.device_height(), second.device_height());
}

#[test]
fn content_growth_extends_the_surface() {
    // Messages streaming in grow the scroll height from 800 to 1600; the
    // next resize must cover the new extent so strokes drawn low in the
    // conversation (e.g. at y=1500) stay on the surface.
    let before = SurfaceGeometry::new(900.0, 800.0, 2.0);
    let after = SurfaceGeometry::new(900.0, 1600.0, 2.0);
    assert_eq!(after.content_height, 1600.0);
    assert_eq!(after.device_height(), 3200);
    assert_eq!(after.content_width, before.content_width);
    assert!(after.content_height > 1500.0);
}
