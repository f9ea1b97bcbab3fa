mod common;

use approx::assert_abs_diff_eq;
use image::RgbaImage;

use framer_core::asset::AssetRole;
use framer_core::error::FramerError;
use framer_core::export::{composite, ExportCompositor, ExportOutcome, FrameSource, SkipReason};
use framer_core::geometry::PreviewCanvasGeometry;
use framer_core::preview::PreviewRenderer;
use framer_core::viewport::ViewportState;

use common::{
    clear_frame, frame_with_cutout, marker_centroid, marker_subject, solid_subject, write_png, RED,
    WHITE,
};

// ---------------------------------------------------------------------------
// Output dimensions and determinism
// ---------------------------------------------------------------------------

#[test]
fn test_output_matches_frame_dimensions_for_any_preview_size() {
    let subject = solid_subject(80, 60, RED);
    let frame = clear_frame(320, 256);
    for side in [50, 137, 400, 600] {
        let mut v = ViewportState::new(PreviewCanvasGeometry::square(side, 10));
        v.set_scale(2.1);
        v.set_rotation(-33.0);
        v.set_pan(0.4, -0.3);
        let result = composite(&subject, &frame, &v.snapshot());
        assert_eq!((result.width(), result.height()), (320, 256));
    }
}

#[test]
fn test_export_twice_is_byte_identical() {
    let subject = marker_subject(120, 90, 30, 30, 15);
    let frame = frame_with_cutout(300, 300, 0.6);
    let mut v = ViewportState::new(PreviewCanvasGeometry::square(150, 20));
    v.set_scale(1.35);
    v.set_rotation(17.0);
    v.set_pan(-0.12, 0.07);

    let a = composite(&subject, &frame, &v.snapshot()).encode_png().unwrap();
    let b = composite(&subject, &frame, &v.snapshot()).encode_png().unwrap();
    assert_eq!(a.bytes(), b.bytes());
}

// ---------------------------------------------------------------------------
// Draw order and coverage
// ---------------------------------------------------------------------------

#[test]
fn test_cutout_fully_covered_at_defaults() {
    let subject = solid_subject(64, 64, RED);
    let frame = frame_with_cutout(256, 256, 0.5);
    let v = ViewportState::new(PreviewCanvasGeometry::square(128, 16));
    let result = composite(&subject, &frame, &v.snapshot());

    for (_, _, p) in result.pixels().enumerate_pixels() {
        assert_eq!(p.0[3], 255, "no transparent gaps anywhere");
    }
    assert_eq!(result.pixels().get_pixel(128, 128).0, RED.0);
}

#[test]
fn test_frame_drawn_last_and_unscaled() {
    let subject = solid_subject(100, 100, RED);
    let frame = frame_with_cutout(200, 200, 0.5);
    let mut v = ViewportState::new(PreviewCanvasGeometry::square(100, 0));
    v.set_scale(3.0);
    v.set_rotation(45.0);
    let result = composite(&subject, &frame, &v.snapshot());

    // Frame border stays white even where the rotated subject lies beneath it.
    assert_eq!(result.pixels().get_pixel(5, 100).0, WHITE.0);
    assert_eq!(result.pixels().get_pixel(100, 5).0, WHITE.0);
    assert_eq!(result.pixels().get_pixel(100, 100).0, RED.0);
}

// ---------------------------------------------------------------------------
// Preview / export alignment
// ---------------------------------------------------------------------------

#[test]
fn test_marker_lands_at_same_canvas_fraction_in_preview_and_export() {
    let subject = marker_subject(200, 100, 110, 40, 20);
    let frame = clear_frame(400, 400);
    let geometry = PreviewCanvasGeometry::square(100, 10);

    let mut v = ViewportState::new(geometry);
    v.set_scale(1.0);
    v.set_rotation(30.0);
    v.set_pan(0.1, -0.05);
    let snap = v.snapshot();

    let mut preview = PreviewRenderer::new(frame.clone(), geometry);
    preview.set_subject(Some(&subject));
    let surface = preview.render(&snap);
    let (px, py) = marker_centroid(&surface, 10, 10, 100, 100).expect("marker in preview");

    let exported = composite(&subject, &frame, &snap);
    let (ex, ey) = marker_centroid(exported.pixels(), 0, 0, 400, 400).expect("marker in export");

    assert_abs_diff_eq!((px - 10.0) / 100.0, ex / 400.0, epsilon = 0.02);
    assert_abs_diff_eq!((py - 10.0) / 100.0, ey / 400.0, epsilon = 0.02);
    // Analytic position: (78.5, 60.7) on the 100 px canvas.
    assert_abs_diff_eq!(ex / 400.0, 0.785, epsilon = 0.02);
    assert_abs_diff_eq!(ey / 400.0, 0.607, epsilon = 0.02);
}

// ---------------------------------------------------------------------------
// Compositor preconditions and failures
// ---------------------------------------------------------------------------

#[test]
fn test_no_subject_is_a_noop() {
    let compositor = ExportCompositor::new();
    let frame = FrameSource::Decoded(clear_frame(64, 64));
    let outcome = compositor
        .export(None, &frame, ViewportState::default().snapshot())
        .unwrap();
    assert!(matches!(outcome, ExportOutcome::Skipped(SkipReason::NoSubject)));
    assert!(!compositor.is_busy());
}

#[test]
fn test_concurrent_request_ignored_while_in_flight() {
    let compositor = ExportCompositor::new();
    let subject = solid_subject(32, 32, RED);
    let frame = FrameSource::Decoded(clear_frame(64, 64));
    let snap = ViewportState::default().snapshot();

    let outcome = compositor
        .export_with(Some(&subject), &frame, snap, |first| {
            assert!(compositor.is_busy());
            let second = compositor.export(Some(&subject), &frame, snap)?;
            assert!(matches!(second, ExportOutcome::Skipped(SkipReason::InFlight)));
            Ok(first.width())
        })
        .unwrap();

    assert_eq!(outcome.completed(), Some(64));
    assert!(!compositor.is_busy());
}

#[test]
fn test_frame_decode_failure_aborts_and_allows_retry() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("frame.png");
    std::fs::write(&broken, b"not an image").unwrap();

    let compositor = ExportCompositor::new();
    let subject = solid_subject(32, 32, RED);
    let snap = ViewportState::default().snapshot();

    let err = compositor
        .export(Some(&subject), &FrameSource::File(broken.clone()), snap)
        .unwrap_err();
    assert!(matches!(
        err,
        FramerError::AssetDecode {
            role: AssetRole::Frame,
            ..
        }
    ));
    assert!(!compositor.is_busy());

    let good = write_png(dir.path(), "good.png", &RgbaImage::new(48, 48));
    let result = compositor
        .export(Some(&subject), &FrameSource::File(good), snap)
        .unwrap()
        .completed()
        .expect("retry completes");
    assert_eq!(result.width(), 48);
}
