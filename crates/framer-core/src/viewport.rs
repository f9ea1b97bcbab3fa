use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_SCALE, MIN_EFFECTIVE_SCALE, PAN_LIMIT, ROTATION_MAX_DEGREES, ROTATION_MIN_DEGREES,
    SCALE_MAX, SCALE_MIN,
};
use crate::geometry::PreviewCanvasGeometry;

/// Live user transform of the subject: zoom, rotation and pan.
///
/// Setters clamp instead of rejecting, and mark the preview for redraw.
/// The pan is normalized against `reference`, the canvas geometry in effect
/// when it was captured, so an export never needs the live layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewport")]
pub struct ViewportState {
    scale: f64,
    rotation_degrees: f64,
    pan_x: f64,
    pan_y: f64,
    reference: PreviewCanvasGeometry,
    #[serde(skip_serializing)]
    redraw: bool,
}

/// Session-file form of the viewport. Loading goes through the setters so
/// out-of-range values clamp exactly as interactive input does.
#[derive(Deserialize)]
#[serde(default)]
struct RawViewport {
    scale: f64,
    rotation_degrees: f64,
    pan_x: f64,
    pan_y: f64,
    reference: PreviewCanvasGeometry,
}

impl Default for RawViewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            rotation_degrees: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            reference: PreviewCanvasGeometry::default(),
        }
    }
}

impl From<RawViewport> for ViewportState {
    fn from(raw: RawViewport) -> Self {
        let mut state = ViewportState::new(raw.reference);
        state.set_scale(raw.scale);
        state.set_rotation(raw.rotation_degrees);
        state.set_pan(raw.pan_x, raw.pan_y);
        state
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            rotation_degrees: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            reference: PreviewCanvasGeometry::default(),
            redraw: true,
        }
    }
}

impl ViewportState {
    pub fn new(reference: PreviewCanvasGeometry) -> Self {
        Self {
            reference,
            ..Self::default()
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale as rendered: degenerate (non-positive or tiny) values clamp up.
    pub fn effective_scale(&self) -> f64 {
        self.scale.max(MIN_EFFECTIVE_SCALE)
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn reference_geometry(&self) -> PreviewCanvasGeometry {
        self.reference
    }

    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        self.scale = scale.clamp(SCALE_MIN, SCALE_MAX);
        self.redraw = true;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            return;
        }
        self.rotation_degrees = degrees.clamp(ROTATION_MIN_DEGREES, ROTATION_MAX_DEGREES);
        self.redraw = true;
    }

    pub fn set_pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.pan_x = dx.clamp(-PAN_LIMIT, PAN_LIMIT);
        self.pan_y = dy.clamp(-PAN_LIMIT, PAN_LIMIT);
        self.redraw = true;
    }

    pub fn set_reference_geometry(&mut self, geometry: PreviewCanvasGeometry) {
        if self.reference != geometry {
            self.reference = geometry;
            self.redraw = true;
        }
    }

    /// Apply a pointer drag of `(dx, dy)` canvas pixels measured on `geometry`.
    ///
    /// The drag is rotated back into the subject's frame so the image follows
    /// the pointer whatever the current rotation.
    pub fn drag_by(&mut self, dx: f64, dy: f64, geometry: PreviewCanvasGeometry) {
        self.set_reference_geometry(geometry);
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let local_dx = dx * cos + dy * sin;
        let local_dy = -dx * sin + dy * cos;
        self.set_pan(
            self.pan_x + local_dx / geometry.display_width as f64,
            self.pan_y + local_dy / geometry.display_height as f64,
        );
    }

    /// Back to defaults, keeping the reference geometry. Used when a new
    /// subject replaces the old one.
    pub fn reset(&mut self) {
        *self = Self::new(self.reference);
    }

    /// Mark the preview stale without changing the transform.
    pub fn invalidate(&mut self) {
        self.redraw = true;
    }

    /// Whether a redraw is pending; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Immutable copy of the transform for a single render or export.
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scale: self.scale,
            rotation_degrees: self.rotation_degrees,
            pan_x: self.pan_x,
            pan_y: self.pan_y,
            reference: self.reference,
        }
    }
}

/// Frozen viewport values. An export works on one of these so interaction
/// during the export cannot change its result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSnapshot {
    pub scale: f64,
    pub rotation_degrees: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub reference: PreviewCanvasGeometry,
}

impl ViewportSnapshot {
    pub fn effective_scale(&self) -> f64 {
        self.scale.max(MIN_EFFECTIVE_SCALE)
    }
}

impl Default for ViewportSnapshot {
    fn default() -> Self {
        ViewportState::default().snapshot()
    }
}
