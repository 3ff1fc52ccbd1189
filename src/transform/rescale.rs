//! Aspect-preserving rescaling into transparent canvases.

use image::imageops;
use image::RgbaImage;
use log::debug;

use super::resample;
use crate::color::{to_pixel, transparent};
use crate::geometry::SizePx;

/// Computes the canvas size for a `size`-pixel rendition of `source`.
///
/// The longer side becomes `size` and the shorter side keeps the source
/// aspect ratio, rounded to the nearest pixel. Both sides are at least one
/// pixel; a `size` of zero is treated as one.
pub fn square_target(source: SizePx, size: u32) -> SizePx {
    let size = size.max(1);
    let (w, h) = (source.width as f64, source.height as f64);
    let side = size as f64;

    if w > h {
        let ratio = side / w;
        SizePx::new(size, round_side(h * ratio))
    } else if w < h {
        let ratio = side / h;
        SizePx::new(round_side(w * ratio), size)
    } else {
        SizePx::square(size)
    }
}

fn round_side(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

/// Scales `source` so that its longer side equals `size`.
///
/// Square sources produce an exact `size x size` canvas. Non-square sources
/// keep their aspect ratio, so the result is *not* square: an 800x400 source
/// at size 100 becomes 100x50.
pub fn square(source: RgbaImage, size: u32) -> RgbaImage {
    let (width, height) = source.dimensions();
    let target = square_target(SizePx::new(width, height), size);
    debug!("rescaling {width}x{height} source to {target}");
    resize(source, target)
}

/// Resamples `source` onto a fresh canvas of exactly `target` size.
///
/// The canvas starts fully transparent and the source's alpha channel is
/// carried through the bilinear resample.
pub fn resize(source: RgbaImage, target: SizePx) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(target.width, target.height, to_pixel(transparent()));
    let scaled = resample(&source, target);
    drop(source);
    imageops::replace(&mut canvas, &scaled, 0, 0);
    canvas
}

/// Like [`square`], but centers the result on a transparent `size x size`
/// canvas so the output is always square.
///
/// Icon container frames must be square, so this is what gets embedded in
/// `favicon.ico`.
pub fn square_canvas(source: RgbaImage, size: u32) -> RgbaImage {
    let size = size.max(1);
    let scaled = square(source, size);
    if scaled.dimensions() == (size, size) {
        return scaled;
    }

    let mut canvas = RgbaImage::from_pixel(size, size, to_pixel(transparent()));
    let x = (size - scaled.width()) / 2;
    let y = (size - scaled.height()) / 2;
    imageops::replace(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}

// ============================================================================
// Tests
// ============================================================================
