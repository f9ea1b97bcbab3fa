mod common;

use std::path::PathBuf;

use framer_core::config::FramerConfig;
use framer_core::error::FramerError;
use framer_core::export::composite;
use framer_core::geometry::PreviewCanvasGeometry;

use common::{clear_frame, solid_subject, RED};

#[test]
fn test_default_config_roundtrip() {
    let mut config = FramerConfig::default();
    config.viewport.set_scale(1.8);
    config.viewport.set_rotation(-12.0);
    config.viewport.set_pan(0.1, -0.2);
    config
        .viewport
        .set_reference_geometry(PreviewCanvasGeometry::square(420, 50));

    let text = config.to_toml_string().unwrap();
    let parsed = FramerConfig::from_toml_str(&text).unwrap();

    assert_eq!(parsed.frame, PathBuf::from("frame.png"));
    assert_eq!(parsed.output.filename, "avatar.png");
    assert_eq!(parsed.viewport.scale(), 1.8);
    assert_eq!(parsed.viewport.rotation_degrees(), -12.0);
    assert_eq!(parsed.viewport.pan(), (0.1, -0.2));
    assert_eq!(
        parsed.viewport.reference_geometry(),
        PreviewCanvasGeometry::square(420, 50)
    );
}

#[test]
fn test_minimal_config_fills_defaults() {
    let config = FramerConfig::from_toml_str("frame = \"assets/ring.png\"\n").unwrap();
    assert_eq!(config.frame, PathBuf::from("assets/ring.png"));
    assert_eq!(config.layout.max_side, 600);
    assert_eq!(config.layout.margin, 140);
    assert_eq!(config.viewport.scale(), 1.0);
    assert!(!config.platform.touch);
    assert_eq!(config.output_path(), PathBuf::from(".").join("avatar.png"));
}

#[test]
fn test_partial_viewport_table() {
    let text = "frame = \"f.png\"\n\n[viewport]\nrotation_degrees = 45.0\n";
    let config = FramerConfig::from_toml_str(text).unwrap();
    assert_eq!(config.viewport.rotation_degrees(), 45.0);
    assert_eq!(config.viewport.scale(), 1.0);
}

#[test]
fn test_invalid_config_is_config_error() {
    let err = FramerConfig::from_toml_str("frame = 3").unwrap_err();
    assert!(matches!(err, FramerError::Config(_)));
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("framer.toml");
    let mut config = FramerConfig::default();
    config.output.filename = "me.png".into();
    config.save(&path).unwrap();

    let loaded = FramerConfig::load(&path).unwrap();
    assert_eq!(loaded.output.filename, "me.png");
}

#[test]
fn test_partial_platform_table_keeps_download() {
    let text = "frame = \"f.png\"\n\n[platform]\ntouch = true\n";
    let config = FramerConfig::from_toml_str(text).unwrap();
    assert!(config.platform.touch);
    assert!(config.platform.file_download);
    assert_eq!(config.platform.plan().len(), 3);
}

// ---------------------------------------------------------------------------
// Out-of-range session values
// ---------------------------------------------------------------------------

#[test]
fn test_loaded_viewport_values_are_clamped() {
    let text = "frame = \"f.png\"\n\n[viewport]\nscale = 50.0\nrotation_degrees = 900.0\npan_x = 7.5\npan_y = -3.0\n";
    let config = FramerConfig::from_toml_str(text).unwrap();
    assert_eq!(config.viewport.scale(), 3.0);
    assert_eq!(config.viewport.rotation_degrees(), 180.0);
    assert_eq!(config.viewport.pan(), (1.0, -1.0));
}

#[test]
fn test_zero_reference_geometry_still_composites() {
    let text = "frame = \"f.png\"\n\n[viewport.reference]\ndisplay_width = 0\ndisplay_height = 0\nborder_inset = 0\n";
    let config = FramerConfig::from_toml_str(text).unwrap();
    let reference = config.viewport.reference_geometry();
    assert_eq!((reference.display_width, reference.display_height), (1, 1));

    let result = composite(
        &solid_subject(8, 8, RED),
        &clear_frame(16, 16),
        &config.viewport.snapshot(),
    );
    assert!(result.pixels().pixels().any(|p| p[3] == 255));
}

#[test]
fn test_huge_border_inset_does_not_overflow() {
    let text = "frame = \"f.png\"\n\n[viewport.reference]\ndisplay_width = 400\ndisplay_height = 400\nborder_inset = 4294967295\n";
    let config = FramerConfig::from_toml_str(text).unwrap();
    assert_eq!(config.viewport.reference_geometry().surface_width(), u32::MAX);
}
