/// Minimum pixel count (w*h) of a target surface to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Lower bound of the zoom control.
pub const SCALE_MIN: f64 = -2.0;

/// Upper bound of the zoom control.
pub const SCALE_MAX: f64 = 3.0;

/// Zoom control step.
pub const SCALE_STEP: f64 = 0.1;

/// Scale values at or below this are degenerate and render at this magnitude.
pub const MIN_EFFECTIVE_SCALE: f64 = 0.1;

/// Default zoom for a freshly loaded subject.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Lower bound of the rotation control, in degrees.
pub const ROTATION_MIN_DEGREES: f64 = -180.0;

/// Upper bound of the rotation control, in degrees.
pub const ROTATION_MAX_DEGREES: f64 = 180.0;

/// Rotation control step, in degrees.
pub const ROTATION_STEP_DEGREES: f64 = 1.0;

/// Normalized pan bound on each axis.
pub const PAN_LIMIT: f64 = 1.0;

/// Margin around the interactive canvas where subject spill-over is shown.
pub const DEFAULT_BORDER_INSET: u32 = 50;

/// Largest interactive canvas side, in pixels.
pub const MAX_PREVIEW_SIDE: u32 = 600;

/// Horizontal space the layout reserves around the canvas.
pub const LAYOUT_MARGIN: u32 = 140;

/// Preview subject proxies are bounded to this multiple of the canvas side.
pub const PREVIEW_PROXY_OVERSAMPLE: u32 = 2;

/// Alpha applied to the border band of the preview surface (0 = untouched).
pub const BORDER_DIM_ALPHA: u8 = 128;

/// Default bundled frame asset.
pub const DEFAULT_FRAME_PATH: &str = "frame.png";

/// Default exported file name.
pub const DEFAULT_OUTPUT_FILENAME: &str = "avatar.png";

/// MIME type of the exported image.
pub const OUTPUT_MIME_TYPE: &str = "image/png";
