use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BORDER_INSET, LAYOUT_MARGIN, MAX_PREVIEW_SIDE};
use crate::viewport::ViewportSnapshot;

/// Size of the interactive canvas the user edits on.
///
/// The frame covers exactly `display_width x display_height`. The preview
/// surface adds `border_inset` pixels on every side where subject spill-over
/// stays visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCanvasGeometry")]
pub struct PreviewCanvasGeometry {
    pub display_width: u32,
    pub display_height: u32,
    pub border_inset: u32,
}

impl PreviewCanvasGeometry {
    pub fn new(display_width: u32, display_height: u32, border_inset: u32) -> Self {
        Self {
            display_width: display_width.max(1),
            display_height: display_height.max(1),
            border_inset,
        }
    }

    pub fn square(side: u32, border_inset: u32) -> Self {
        Self::new(side, side, border_inset)
    }

    /// Full preview surface width, border included.
    pub fn surface_width(&self) -> u32 {
        self.display_width
            .saturating_add(self.border_inset.saturating_mul(2))
    }

    /// Full preview surface height, border included.
    pub fn surface_height(&self) -> u32 {
        self.display_height
            .saturating_add(self.border_inset.saturating_mul(2))
    }
}

impl Default for PreviewCanvasGeometry {
    fn default() -> Self {
        Self::square(400, DEFAULT_BORDER_INSET)
    }
}

/// Unchecked form read from a session file; goes through `new` so a zero
/// side never reaches a divisor.
#[derive(Deserialize)]
struct RawCanvasGeometry {
    display_width: u32,
    display_height: u32,
    border_inset: u32,
}

impl From<RawCanvasGeometry> for PreviewCanvasGeometry {
    fn from(raw: RawCanvasGeometry) -> Self {
        Self::new(raw.display_width, raw.display_height, raw.border_inset)
    }
}

/// Responsive sizing rule for the interactive canvas: square, as wide as the
/// container allows after `margin`, capped at `max_side`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub max_side: u32,
    pub margin: u32,
    pub border_inset: u32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            max_side: MAX_PREVIEW_SIDE,
            margin: LAYOUT_MARGIN,
            border_inset: DEFAULT_BORDER_INSET,
        }
    }
}

impl LayoutPolicy {
    pub fn geometry_for(&self, container_width: u32) -> PreviewCanvasGeometry {
        let side = container_width.saturating_sub(self.margin).min(self.max_side);
        PreviewCanvasGeometry::square(side, self.border_inset)
    }
}

/// Where the subject lands on a target surface.
///
/// Preview and export both build their placement here; they differ only in
/// the target rectangle, which is what keeps the two renderings aligned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubjectPlacement {
    /// Target canvas width / reference canvas width.
    pub scale_factor: f64,
    pub draw_width: f64,
    pub draw_height: f64,
    /// Pan converted to target pixels.
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation_radians: f64,
    /// Maps subject draw coordinates `[0, draw_width] x [0, draw_height]`
    /// onto the target surface.
    pub transform: Affine,
}

impl SubjectPlacement {
    /// Place a subject of aspect ratio `subject_aspect` (width / height) on a
    /// `target_width x target_height` canvas whose top-left sits at
    /// `(origin_x, origin_y)` on the surface.
    pub fn compute(
        view: &ViewportSnapshot,
        subject_aspect: f64,
        origin: (f64, f64),
        target_width: u32,
        target_height: u32,
    ) -> Self {
        let reference = view.reference;
        let scale_factor = target_width as f64 / reference.display_width as f64;

        let draw_height = reference.display_height as f64 * view.effective_scale() * scale_factor;
        let draw_width = draw_height * subject_aspect;

        // Offset and draw size share one scale factor.
        let offset_x = view.pan_x * reference.display_width as f64 * scale_factor;
        let offset_y = view.pan_y * reference.display_height as f64 * scale_factor;

        let rotation_radians = view.rotation_degrees.to_radians();

        let center_x = origin.0 + target_width as f64 / 2.0;
        let center_y = origin.1 + target_height as f64 / 2.0;

        // Rightmost factor applies first. Positive angles turn clockwise on
        // screen because the y axis points down.
        let transform = Affine::translate((center_x, center_y))
            * Affine::rotate(rotation_radians)
            * Affine::translate((-draw_width / 2.0, -draw_height / 2.0))
            * Affine::translate((offset_x, offset_y));

        Self {
            scale_factor,
            draw_width,
            draw_height,
            offset_x,
            offset_y,
            rotation_radians,
            transform,
        }
    }

    /// Surface position of a point given in subject draw coordinates.
    pub fn to_surface(&self, u: f64, v: f64) -> (f64, f64) {
        let p = self.transform * Point::new(u, v);
        (p.x, p.y)
    }

    /// Surface position of the subject's center.
    pub fn center(&self) -> (f64, f64) {
        self.to_surface(self.draw_width / 2.0, self.draw_height / 2.0)
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            self.to_surface(0.0, 0.0),
            self.to_surface(self.draw_width, 0.0),
            self.to_surface(self.draw_width, self.draw_height),
            self.to_surface(0.0, self.draw_height),
        ]
    }

    /// Axis-aligned bounds of the transformed subject: `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let r = self
            .transform
            .transform_rect_bbox(Rect::new(0.0, 0.0, self.draw_width, self.draw_height));
        (r.x0, r.y0, r.x1, r.y1)
    }
}
