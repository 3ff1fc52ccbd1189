//! Image transforms used to produce favicon renditions.
//!
//! Every transform consumes an [`RgbaImage`] and returns a freshly allocated
//! one. Nothing is mutated behind the caller's back: the source buffer is
//! dropped once the new canvas exists.
//!
//! - [`rescale`]: aspect-preserving "square" renditions with alpha kept.
//! - [`tile`]: padded, centered composites on an opaque background.

pub mod rescale;
pub mod tile;

pub use rescale::{resize, square, square_canvas, square_target};
pub use tile::{tile, tile_placement, TileSpec};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::geometry::SizePx;

/// Bilinear resampling. Deterministic, so repeated runs produce identical
/// PNG bytes.
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Resamples the full extent of `source` onto a `target`-sized image.
pub(crate) fn resample(source: &RgbaImage, target: SizePx) -> RgbaImage {
    if source.dimensions() == (target.width, target.height) {
        return source.clone();
    }
    imageops::resize(source, target.width, target.height, RESAMPLE_FILTER)
}

/// Composites a source image onto a destination image at the given offset.
///
/// Uses straight-alpha "source over" blending. Pixels that fall outside the
/// destination are skipped.
pub(crate) fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx, y + sy);
        if dx >= dest.width() || dy >= dest.height() {
            continue;
        }
        let blended = alpha_blend(*src_pixel, *dest.get_pixel(dx, dy));
        dest.put_pixel(dx, dy, blended);
    }
}

/// Straight-alpha "source over" for one pixel.
///
/// The destination's contribution is weighted by what the source leaves
/// uncovered; channels are divided back out by the resulting alpha.
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_weight = f32::from(src[3]) / 255.0;
    let dst_weight = f32::from(dst[3]) / 255.0 * (1.0 - src_weight);
    let coverage = src_weight + dst_weight;
    if coverage <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| {
        ((f32::from(s) * src_weight + f32::from(d) * dst_weight) / coverage).round() as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (coverage * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_opaque_source_replaces_pixels() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, 3, 3);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(dest.get_pixel(7, 7).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_transparent_source_onto_opaque_stays_opaque() {
        let mut dest = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));

        composite_over(&mut dest, &src, 0, 0);

        assert_eq!(dest.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn translucent_source_mixes_with_opaque_background() {
        // 128/255 of blue over red
        let mut dest = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        composite_over(&mut dest, &RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128])), 0, 0);
        assert_eq!(dest.get_pixel(0, 0).0, [127, 0, 128, 255]);

        // 64/255 of black over white
        let mut dest = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        composite_over(&mut dest, &RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 64])), 0, 0);
        assert_eq!(dest.get_pixel(1, 1).0, [191, 191, 191, 255]);
    }

    #[test]
    fn blend_onto_empty_destination_keeps_source() {
        assert_eq!(alpha_blend(Rgba([10, 20, 30, 40]), Rgba([0, 0, 0, 0])).0, [10, 20, 30, 40]);
        assert_eq!(alpha_blend(Rgba([0, 0, 0, 0]), Rgba([0, 0, 0, 0])).0, [0, 0, 0, 0]);
    }

    #[test]
    fn composite_clips_at_edges() {
        let mut dest = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));

        composite_over(&mut dest, &src, 2, 2);

        assert_eq!(dest.get_pixel(3, 3).0, [9, 9, 9, 255]);
        assert_eq!(dest.get_pixel(1, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn resample_same_size_is_identity() {
        let src = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 7, 200]));
        assert_eq!(resample(&src, SizePx::new(3, 2)), src);
    }
}
