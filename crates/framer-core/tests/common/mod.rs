#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};

use framer_core::asset::{AssetRole, ImageAsset};
use framer_core::delivery::{EncodedImage, Persist};
use framer_core::error::{FramerError, Result};

pub const RED: Rgba<u8> = Rgba([220, 0, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Uniform subject of the given size.
pub fn solid_subject(width: u32, height: u32, color: Rgba<u8>) -> ImageAsset {
    ImageAsset::from_rgba(AssetRole::Subject, RgbaImage::from_pixel(width, height, color))
        .expect("valid subject")
}

/// Blue subject with a green `size x size` marker whose top-left is `(mx, my)`.
pub fn marker_subject(width: u32, height: u32, mx: u32, my: u32, size: u32) -> ImageAsset {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if x >= mx && x < mx + size && y >= my && y < my + size {
            GREEN
        } else {
            BLUE
        }
    });
    ImageAsset::from_rgba(AssetRole::Subject, img).expect("valid subject")
}

/// Fully transparent frame, so the subject is visible everywhere.
pub fn clear_frame(width: u32, height: u32) -> ImageAsset {
    ImageAsset::from_rgba(AssetRole::Frame, RgbaImage::from_pixel(width, height, CLEAR))
        .expect("valid frame")
}

/// Opaque white frame with a transparent centered square cutout covering
/// `cutout_fraction` of each side.
pub fn frame_with_cutout(width: u32, height: u32, cutout_fraction: f64) -> ImageAsset {
    let cw = (width as f64 * cutout_fraction) as u32;
    let ch = (height as f64 * cutout_fraction) as u32;
    let x0 = (width - cw) / 2;
    let y0 = (height - ch) / 2;
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if x >= x0 && x < x0 + cw && y >= y0 && y < y0 + ch {
            CLEAR
        } else {
            WHITE
        }
    });
    ImageAsset::from_rgba(AssetRole::Frame, img).expect("valid frame")
}

pub fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write test png");
    path
}

/// Centroid of pixels inside `(x0, y0, w, h)` that look like the green
/// marker, or `None` when there are none.
pub fn marker_centroid(img: &RgbaImage, x0: u32, y0: u32, w: u32, h: u32) -> Option<(f64, f64)> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let p = img.get_pixel(x, y).0;
            if p[1] > 200 && p[0] < 60 && p[2] < 60 {
                sum_x += x as f64 + 0.5;
                sum_y += y as f64 + 0.5;
                count += 1;
            }
        }
    }
    (count > 0).then(|| (sum_x / count as f64, sum_y / count as f64))
}

/// Persist target that records every buffer it receives and optionally fails.
#[derive(Clone)]
pub struct RecordingTarget {
    pub received: Arc<Mutex<Vec<Vec<u8>>>>,
    pub fail: bool,
}

impl RecordingTarget {
    pub fn new(fail: bool) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            fail,
        }
    }

    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

impl Persist for RecordingTarget {
    fn persist(&mut self, encoded: &EncodedImage, _suggested_filename: &str) -> Result<()> {
        self.received.lock().unwrap().push(encoded.bytes().to_vec());
        if self.fail {
            Err(FramerError::delivery("recording", "simulated failure"))
        } else {
            Ok(())
        }
    }
}
