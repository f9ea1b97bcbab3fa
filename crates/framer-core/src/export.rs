use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use image::RgbaImage;
use tracing::{debug, info};

use crate::asset::{load_asset, AssetRole, ImageAsset};
use crate::delivery::{encode_png, DeliveryChain, DeliveryReport, EncodedImage};
use crate::error::Result;
use crate::geometry::SubjectPlacement;
use crate::raster::{draw_subject, overlay};
use crate::viewport::ViewportSnapshot;

/// Where the export gets its frame from.
#[derive(Clone, Debug)]
pub enum FrameSource {
    Decoded(ImageAsset),
    /// Decoded when the export runs; a decode failure aborts the export.
    File(PathBuf),
}

impl FrameSource {
    pub fn resolve(&self) -> Result<ImageAsset> {
        match self {
            Self::Decoded(asset) => Ok(asset.clone()),
            Self::File(path) => load_asset(path, AssetRole::Frame),
        }
    }
}

/// Flattened export at the frame's native resolution.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    image: RgbaImage,
}

impl CompositeResult {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn encode_png(&self) -> Result<EncodedImage> {
        encode_png(&self.image)
    }
}

/// Why an export request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No subject has been loaded yet.
    NoSubject,
    /// Another export is still running.
    InFlight,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSubject => write!(f, "no subject loaded"),
            Self::InFlight => write!(f, "an export is already running"),
        }
    }
}

#[derive(Debug)]
pub enum ExportOutcome<T> {
    Completed(T),
    Skipped(SkipReason),
}

impl<T> ExportOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(v) => Some(v),
            Self::Skipped(_) => None,
        }
    }
}

/// Subject placement on the export surface of `frame`.
pub fn export_placement(
    subject: &ImageAsset,
    frame: &ImageAsset,
    view: &ViewportSnapshot,
) -> SubjectPlacement {
    SubjectPlacement::compute(
        view,
        subject.aspect_ratio(),
        (0.0, 0.0),
        frame.width(),
        frame.height(),
    )
}

/// Rasterize the subject through `view` at the frame's native size, then
/// the frame on top, unscaled and unrotated.
pub fn composite(subject: &ImageAsset, frame: &ImageAsset, view: &ViewportSnapshot) -> CompositeResult {
    let placement = export_placement(subject, frame, view);
    debug!(
        scale_factor = placement.scale_factor,
        draw_width = placement.draw_width,
        draw_height = placement.draw_height,
        offset_x = placement.offset_x,
        offset_y = placement.offset_y,
        "Export placement"
    );

    let mut surface = RgbaImage::new(frame.width(), frame.height());
    draw_subject(&mut surface, subject.pixels(), &placement);
    overlay(&mut surface, frame.pixels(), 0, 0);
    CompositeResult { image: surface }
}

/// Resets the in-flight flag however the export ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs exports one at a time. Requests arriving while an export is in
/// flight are skipped, not queued.
#[derive(Debug, Default)]
pub struct ExportCompositor {
    in_flight: AtomicBool,
}

impl ExportCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    /// Composite, then hand the result to `finish` while still holding the
    /// in-flight slot.
    pub fn export_with<T>(
        &self,
        subject: Option<&ImageAsset>,
        frame: &FrameSource,
        view: ViewportSnapshot,
        finish: impl FnOnce(CompositeResult) -> Result<T>,
    ) -> Result<ExportOutcome<T>> {
        let Some(subject) = subject else {
            debug!("Export requested without a subject, ignoring");
            return Ok(ExportOutcome::Skipped(SkipReason::NoSubject));
        };
        let Some(_guard) = self.begin() else {
            debug!("Export already in flight, ignoring request");
            return Ok(ExportOutcome::Skipped(SkipReason::InFlight));
        };

        let start = Instant::now();
        let frame = frame.resolve()?;
        let result = composite(subject, &frame, &view);
        info!(
            width = result.width(),
            height = result.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Export composited"
        );
        finish(result).map(ExportOutcome::Completed)
    }

    pub fn export(
        &self,
        subject: Option<&ImageAsset>,
        frame: &FrameSource,
        view: ViewportSnapshot,
    ) -> Result<ExportOutcome<CompositeResult>> {
        self.export_with(subject, frame, view, Ok)
    }

    /// Composite, encode once, and deliver through `chain`.
    pub fn export_and_deliver(
        &self,
        subject: Option<&ImageAsset>,
        frame: &FrameSource,
        view: ViewportSnapshot,
        chain: &mut DeliveryChain,
        suggested_filename: &str,
    ) -> Result<ExportOutcome<DeliveryReport>> {
        self.export_with(subject, frame, view, |result| {
            let encoded = result.encode_png()?;
            chain.deliver(&encoded, suggested_filename)
        })
    }
}
