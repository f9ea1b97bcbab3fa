use image::RgbaImage;
use tracing::debug;

use crate::asset::ImageAsset;
use crate::consts::{BORDER_DIM_ALPHA, PREVIEW_PROXY_OVERSAMPLE};
use crate::geometry::{PreviewCanvasGeometry, SubjectPlacement};
use crate::raster::{dim_outside, draw_subject, overlay};
use crate::viewport::{ViewportSnapshot, ViewportState};

/// Subject kept for preview: a bounded-size proxy plus the intrinsic aspect
/// of the original, which the placement must use.
struct SubjectProxy {
    aspect: f64,
    original: ImageAsset,
    proxy: ImageAsset,
}

/// Renders the live editing surface.
///
/// The surface is the canvas plus a dimmed border band on each side. Every
/// draw recomputes from the viewport snapshot, so rendering twice with the
/// same inputs gives the same pixels.
pub struct PreviewRenderer {
    geometry: PreviewCanvasGeometry,
    frame: ImageAsset,
    frame_canvas: ImageAsset,
    subject: Option<SubjectProxy>,
}

impl PreviewRenderer {
    pub fn new(frame: ImageAsset, geometry: PreviewCanvasGeometry) -> Self {
        let frame_canvas = frame.resized(geometry.display_width, geometry.display_height);
        Self {
            geometry,
            frame,
            frame_canvas,
            subject: None,
        }
    }

    pub fn geometry(&self) -> PreviewCanvasGeometry {
        self.geometry
    }

    pub fn has_subject(&self) -> bool {
        self.subject.is_some()
    }

    /// Adopt a new canvas size. Rebuilds the canvas-sized frame and proxy.
    pub fn set_geometry(&mut self, geometry: PreviewCanvasGeometry) {
        if geometry == self.geometry {
            return;
        }
        debug!(
            width = geometry.display_width,
            height = geometry.display_height,
            "Preview canvas resized"
        );
        self.geometry = geometry;
        self.frame_canvas = self
            .frame
            .resized(geometry.display_width, geometry.display_height);
        if let Some(current) = self.subject.take() {
            self.set_subject(Some(&current.original));
        }
    }

    /// Replace (or clear) the subject.
    pub fn set_subject(&mut self, subject: Option<&ImageAsset>) {
        self.subject = subject.map(|original| {
            let max_side = self
                .geometry
                .display_width
                .max(self.geometry.display_height)
                * PREVIEW_PROXY_OVERSAMPLE;
            SubjectProxy {
                aspect: original.aspect_ratio(),
                original: original.clone(),
                proxy: original.downsampled(max_side),
            }
        });
    }

    /// Where the subject lands on the preview surface for `view`.
    pub fn placement(&self, view: &ViewportSnapshot) -> Option<SubjectPlacement> {
        let subject = self.subject.as_ref()?;
        let inset = self.geometry.border_inset as f64;
        Some(SubjectPlacement::compute(
            view,
            subject.aspect,
            (inset, inset),
            self.geometry.display_width,
            self.geometry.display_height,
        ))
    }

    /// Draw the full preview surface.
    pub fn render(&self, view: &ViewportSnapshot) -> RgbaImage {
        let g = self.geometry;
        let mut surface = RgbaImage::new(g.surface_width(), g.surface_height());

        if let (Some(subject), Some(placement)) = (self.subject.as_ref(), self.placement(view)) {
            draw_subject(&mut surface, subject.proxy.pixels(), &placement);
        }

        dim_outside(
            &mut surface,
            g.border_inset,
            g.border_inset,
            g.display_width,
            g.display_height,
            BORDER_DIM_ALPHA,
        );
        overlay(
            &mut surface,
            self.frame_canvas.pixels(),
            g.border_inset,
            g.border_inset,
        );
        surface
    }

    /// Render only when the viewport changed since the last call.
    pub fn render_if_dirty(&self, view: &mut ViewportState) -> Option<RgbaImage> {
        if view.take_redraw() {
            Some(self.render(&view.snapshot()))
        } else {
            None
        }
    }
}
