mod common;

use image::{Rgba, RgbaImage};

use framer_core::asset::{decode_asset, load_asset, AssetRole, ImageAsset};
use framer_core::error::FramerError;

use common::{frame_with_cutout, solid_subject, write_png, RED};

#[test]
fn test_load_asset_reports_intrinsic_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "photo.png", &RgbaImage::from_pixel(40, 30, RED));
    let asset = load_asset(&path, AssetRole::Subject).unwrap();
    assert_eq!((asset.width(), asset.height()), (40, 30));
    assert_eq!(asset.role(), AssetRole::Subject);
    assert!((asset.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_missing_file_is_decode_error_with_role() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_asset(&dir.path().join("nope.png"), AssetRole::Frame).unwrap_err();
    assert!(matches!(
        err,
        FramerError::AssetDecode {
            role: AssetRole::Frame,
            ..
        }
    ));
    assert!(err.to_string().contains("frame"));
}

#[test]
fn test_decode_from_memory() {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(5, 7, Rgba([1, 2, 3, 255]))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let asset = decode_asset(&bytes, AssetRole::Subject).unwrap();
    assert_eq!((asset.width(), asset.height()), (5, 7));

    let err = decode_asset(b"garbage", AssetRole::Subject).unwrap_err();
    assert!(matches!(err, FramerError::AssetDecode { .. }));
}

#[test]
fn test_zero_sized_buffer_rejected() {
    let err = ImageAsset::from_rgba(AssetRole::Subject, RgbaImage::new(0, 10)).unwrap_err();
    assert!(matches!(
        err,
        FramerError::InvalidDimensions {
            width: 0,
            height: 10
        }
    ));
}

#[test]
fn test_downsampled_bounds_longest_side() {
    let asset = solid_subject(1000, 250, RED);
    let small = asset.downsampled(200);
    assert_eq!((small.width(), small.height()), (200, 50));

    let untouched = asset.downsampled(4000);
    assert_eq!((untouched.width(), untouched.height()), (1000, 250));
}

#[test]
fn test_transparency_detection() {
    assert!(frame_with_cutout(20, 20, 0.5).has_transparency());
    assert!(!solid_subject(20, 20, RED).has_transparency());
}
