use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use crate::error::{FramerError, Result};

/// Which of the two concurrent assets an image plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetRole {
    /// The user photo placed behind the frame.
    Subject,
    /// The fixed overlay with a transparent cutout.
    Frame,
}

impl std::fmt::Display for AssetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subject => write!(f, "subject"),
            Self::Frame => write!(f, "frame"),
        }
    }
}

/// A decoded RGBA image with its intrinsic size.
///
/// The pixel buffer is shared behind an `Arc` and never mutated after decode,
/// so the preview and the export can read the same asset without copying.
/// Replacing the subject means swapping the whole asset.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    role: AssetRole,
    pixels: Arc<RgbaImage>,
}

impl ImageAsset {
    /// Wrap an already-decoded buffer. Zero-sized images are rejected.
    pub fn from_rgba(role: AssetRole, pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(FramerError::InvalidDimensions { width, height });
        }
        Ok(Self {
            role,
            pixels: Arc::new(pixels),
        })
    }

    pub fn role(&self) -> AssetRole {
        self.role
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Intrinsic width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether the asset carries any pixel that is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.pixels.pixels().any(|p| p.0[3] < u8::MAX)
    }

    /// Copy scaled so the longest side is at most `max_side`.
    /// Returns a cheap clone when the asset is already small enough.
    pub fn downsampled(&self, max_side: u32) -> ImageAsset {
        let longest = self.width().max(self.height());
        if longest <= max_side || max_side == 0 {
            return self.clone();
        }
        let ratio = max_side as f64 / longest as f64;
        let w = ((self.width() as f64 * ratio).round() as u32).max(1);
        let h = ((self.height() as f64 * ratio).round() as u32).max(1);
        self.resized(w, h)
    }

    /// Copy resampled to exactly `width x height`.
    pub fn resized(&self, width: u32, height: u32) -> ImageAsset {
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        let resized = imageops::resize(self.pixels.as_ref(), width.max(1), height.max(1), FilterType::Triangle);
        Self {
            role: self.role,
            pixels: Arc::new(resized),
        }
    }
}

/// Decode an image file from disk.
pub fn load_asset(path: &Path, role: AssetRole) -> Result<ImageAsset> {
    let decoded = image::open(path).map_err(|source| FramerError::AssetDecode { role, source })?;
    let asset = ImageAsset::from_rgba(role, decoded.to_rgba8())?;
    debug!(
        %role,
        path = %path.display(),
        width = asset.width(),
        height = asset.height(),
        "Asset decoded"
    );
    Ok(asset)
}

/// Decode an in-memory encoded image (format guessed from its magic bytes).
pub fn decode_asset(bytes: &[u8], role: AssetRole) -> Result<ImageAsset> {
    let decoded =
        image::load_from_memory(bytes).map_err(|source| FramerError::AssetDecode { role, source })?;
    ImageAsset::from_rgba(role, decoded.to_rgba8())
}
