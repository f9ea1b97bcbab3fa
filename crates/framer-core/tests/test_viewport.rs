use approx::assert_abs_diff_eq;

use framer_core::geometry::PreviewCanvasGeometry;
use framer_core::viewport::ViewportState;

// ---------------------------------------------------------------------------
// Setters and clamping
// ---------------------------------------------------------------------------

#[test]
fn test_defaults() {
    let v = ViewportState::default();
    assert_eq!(v.scale(), 1.0);
    assert_eq!(v.rotation_degrees(), 0.0);
    assert_eq!(v.pan(), (0.0, 0.0));
}

#[test]
fn test_scale_clamped_to_control_range() {
    let mut v = ViewportState::default();
    v.set_scale(7.5);
    assert_eq!(v.scale(), 3.0);
    v.set_scale(-9.0);
    assert_eq!(v.scale(), -2.0);
}

#[test]
fn test_degenerate_scale_renders_at_minimum_magnitude() {
    let mut v = ViewportState::default();
    v.set_scale(-1.5);
    assert_abs_diff_eq!(v.effective_scale(), 0.1);
    v.set_scale(0.0);
    assert_abs_diff_eq!(v.effective_scale(), 0.1);
    v.set_scale(2.2);
    assert_abs_diff_eq!(v.effective_scale(), 2.2);
    assert_abs_diff_eq!(v.snapshot().effective_scale(), 2.2);
}

#[test]
fn test_rotation_clamped() {
    let mut v = ViewportState::default();
    v.set_rotation(270.0);
    assert_eq!(v.rotation_degrees(), 180.0);
    v.set_rotation(-400.0);
    assert_eq!(v.rotation_degrees(), -180.0);
}

#[test]
fn test_pan_clamped_per_axis() {
    let mut v = ViewportState::default();
    v.set_pan(1.7, -0.25);
    assert_eq!(v.pan(), (1.0, -0.25));
    v.set_pan(-3.0, 3.0);
    assert_eq!(v.pan(), (-1.0, 1.0));
}

#[test]
fn test_non_finite_input_ignored() {
    let mut v = ViewportState::default();
    v.set_scale(1.5);
    v.set_scale(f64::NAN);
    v.set_rotation(f64::INFINITY);
    v.set_pan(f64::NAN, 0.5);
    assert_eq!(v.scale(), 1.5);
    assert_eq!(v.rotation_degrees(), 0.0);
    assert_eq!(v.pan(), (0.0, 0.0));
}

// ---------------------------------------------------------------------------
// Redraw invalidation
// ---------------------------------------------------------------------------

#[test]
fn test_setters_request_redraw() {
    let mut v = ViewportState::default();
    assert!(v.take_redraw(), "first frame must draw");
    assert!(!v.take_redraw());

    v.set_scale(1.2);
    assert!(v.take_redraw());
    v.set_rotation(10.0);
    assert!(v.take_redraw());
    v.set_pan(0.1, 0.1);
    assert!(v.take_redraw());
    assert!(!v.take_redraw());
}

#[test]
fn test_same_reference_geometry_does_not_redraw() {
    let g = PreviewCanvasGeometry::square(300, 20);
    let mut v = ViewportState::new(g);
    v.take_redraw();
    v.set_reference_geometry(g);
    assert!(!v.take_redraw());
    v.set_reference_geometry(PreviewCanvasGeometry::square(310, 20));
    assert!(v.take_redraw());
}

// ---------------------------------------------------------------------------
// Drag and reset
// ---------------------------------------------------------------------------

#[test]
fn test_drag_normalizes_against_geometry() {
    let g = PreviewCanvasGeometry::square(400, 50);
    let mut v = ViewportState::default();
    v.drag_by(100.0, -40.0, g);
    let (px, py) = v.pan();
    assert_abs_diff_eq!(px, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(py, -0.1, epsilon = 1e-12);
    assert_eq!(v.reference_geometry(), g);
}

#[test]
fn test_drag_follows_pointer_when_rotated() {
    // With a 90 degree rotation the subject's local x axis points down the
    // screen, so a rightward drag moves the pan along local -y.
    let g = PreviewCanvasGeometry::square(200, 0);
    let mut v = ViewportState::new(g);
    v.set_rotation(90.0);
    v.drag_by(20.0, 0.0, g);
    let (px, py) = v.pan();
    assert_abs_diff_eq!(px, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(py, -0.1, epsilon = 1e-12);
}

#[test]
fn test_reset_keeps_reference_geometry() {
    let g = PreviewCanvasGeometry::square(250, 30);
    let mut v = ViewportState::new(g);
    v.set_scale(2.5);
    v.set_rotation(-45.0);
    v.set_pan(0.3, 0.3);
    v.reset();
    assert_eq!(v.scale(), 1.0);
    assert_eq!(v.rotation_degrees(), 0.0);
    assert_eq!(v.pan(), (0.0, 0.0));
    assert_eq!(v.reference_geometry(), g);
}

#[test]
fn test_snapshot_is_detached() {
    let mut v = ViewportState::default();
    v.set_scale(1.4);
    let snap = v.snapshot();
    v.set_scale(2.8);
    assert_eq!(snap.scale, 1.4);
}
