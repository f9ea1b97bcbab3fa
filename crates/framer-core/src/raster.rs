use image::{Rgba, RgbaImage};
use kurbo::Point;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::geometry::SubjectPlacement;

const CHANNELS: usize = 4;

/// Draw `subject` onto `surface` through `placement`, source-over.
///
/// Each destination pixel center is mapped back into subject draw
/// coordinates and sampled bilinearly. Pixels outside the transformed
/// subject are left untouched.
pub fn draw_subject(surface: &mut RgbaImage, subject: &RgbaImage, placement: &SubjectPlacement) {
    let det = placement.transform.determinant();
    if !det.is_finite() || det.abs() < f64::EPSILON {
        return;
    }
    if placement.draw_width <= 0.0 || placement.draw_height <= 0.0 {
        return;
    }
    let inverse = placement.transform.inverse();

    let (sw, sh) = (surface.width(), surface.height());
    let (min_x, min_y, max_x, max_y) = placement.bounds();
    let row_start = min_y.floor().max(0.0) as u32;
    let row_end = max_y.ceil().min(sh as f64) as u32;
    let col_start = min_x.floor().max(0.0) as u32;
    let col_end = max_x.ceil().min(sw as f64) as u32;
    if row_start >= row_end || col_start >= col_end {
        return;
    }

    let u_scale = subject.width() as f64 / placement.draw_width;
    let v_scale = subject.height() as f64 / placement.draw_height;

    let paint_row = |(y, row): (usize, &mut [u8])| {
        let y = y as u32;
        if y < row_start || y >= row_end {
            return;
        }
        let py = y as f64 + 0.5;
        for x in col_start..col_end {
            let px = x as f64 + 0.5;
            let Point { x: u, y: v } = inverse * Point::new(px, py);
            if u < 0.0 || v < 0.0 || u >= placement.draw_width || v >= placement.draw_height {
                continue;
            }
            let src = sample_bilinear(subject, u * u_scale - 0.5, v * v_scale - 0.5);
            let idx = x as usize * CHANNELS;
            let dst = Rgba([row[idx], row[idx + 1], row[idx + 2], row[idx + 3]]);
            row[idx..idx + CHANNELS].copy_from_slice(&blend_over(dst, src).0);
        }
    };

    let stride = sw as usize * CHANNELS;
    let pixels: &mut [u8] = surface;
    if (sw as usize) * (sh as usize) >= PARALLEL_PIXEL_THRESHOLD {
        pixels.par_chunks_mut(stride).enumerate().for_each(paint_row);
    } else {
        pixels.chunks_mut(stride).enumerate().for_each(paint_row);
    }
}

/// Draw `layer` unscaled with its top-left at `(x0, y0)`, source-over.
/// Parts falling outside the surface are clipped.
pub fn overlay(surface: &mut RgbaImage, layer: &RgbaImage, x0: u32, y0: u32) {
    let (sw, sh) = (surface.width(), surface.height());
    if x0 >= sw || y0 >= sh {
        return;
    }
    let cols = layer.width().min(sw - x0);
    let rows = layer.height().min(sh - y0);

    let paint_row = |(y, row): (usize, &mut [u8])| {
        let y = y as u32;
        if y < y0 || y >= y0 + rows {
            return;
        }
        for lx in 0..cols {
            let src = *layer.get_pixel(lx, y - y0);
            if src.0[3] == 0 {
                continue;
            }
            let idx = (x0 + lx) as usize * CHANNELS;
            let dst = Rgba([row[idx], row[idx + 1], row[idx + 2], row[idx + 3]]);
            row[idx..idx + CHANNELS].copy_from_slice(&blend_over(dst, src).0);
        }
    };

    let stride = sw as usize * CHANNELS;
    let pixels: &mut [u8] = surface;
    if (sw as usize) * (sh as usize) >= PARALLEL_PIXEL_THRESHOLD {
        pixels.par_chunks_mut(stride).enumerate().for_each(paint_row);
    } else {
        pixels.chunks_mut(stride).enumerate().for_each(paint_row);
    }
}

/// Darken everything outside the `width x height` rectangle at `(x0, y0)`
/// with black at `alpha`.
pub fn dim_outside(surface: &mut RgbaImage, x0: u32, y0: u32, width: u32, height: u32, alpha: u8) {
    if alpha == 0 {
        return;
    }
    let shade = Rgba([0, 0, 0, alpha]);
    for (x, y, px) in surface.enumerate_pixels_mut() {
        let inside = x >= x0 && x < x0 + width && y >= y0 && y < y0 + height;
        if !inside {
            *px = blend_over(*px, shade);
        }
    }
}

/// Bilinear interpolation at fractional coords, clamp-to-edge outside.
#[inline]
pub fn sample_bilinear(img: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let fetch = |sx: i64, sy: i64| -> [f64; 4] {
        let cx = sx.clamp(0, w - 1) as u32;
        let cy = sy.clamp(0, h - 1) as u32;
        let p = img.get_pixel(cx, cy).0;
        [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let v = p00[i] * w00 + p10[i] * w10 + p01[i] * w01 + p11[i] * w11;
        *channel = v.round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Straight-alpha source-over.
#[inline]
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3];
    if sa == u8::MAX || dst.0[3] == 0 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let sa = sa as f32 / 255.0;
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src.0[i] as f32 * sa + dst.0[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
