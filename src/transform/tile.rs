//! Windows tile compositing.
//!
//! A tile is an opaque canvas of fixed size filled with a background color,
//! with a proportionally scaled copy of the source centered inside a padded
//! area. The output has no transparent pixels.

use image::RgbaImage;
use log::debug;
use palette::Srgb;

use super::{composite_over, resample};
use crate::color::{opaque, to_hex_string, to_pixel};
use crate::error::{FaviconError, Result};
use crate::geometry::{RectPx, SizePx};

// ============================================================================
// TileSpec
// ============================================================================

/// Size, padding and background of one tile rendition.
///
/// Only [`TileSpec::new`] builds one, so every spec in circulation leaves a
/// non-empty padded area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    width: u32,
    height: u32,
    padding: u32,
    background: Srgb<u8>,
}

impl TileSpec {
    /// Creates a tile spec, checking that the padded area is non-empty.
    ///
    /// Fails with [`FaviconError::Config`] if either side is zero or if
    /// `2 * padding >= min(width, height)`.
    pub fn new(width: u32, height: u32, padding: u32, background: Srgb<u8>) -> Result<Self> {
        let size = SizePx::new(width, height);
        if !size.is_positive() {
            return Err(FaviconError::config(format!("tile size {size} must be positive")));
        }
        if padding.saturating_mul(2) >= size.min_side() {
            return Err(FaviconError::config(format!(
                "tile padding {padding}px leaves no room inside a {size} tile"
            )));
        }
        Ok(Self {
            width,
            height,
            padding,
            background,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Minimum distance in pixels between the scaled source and the canvas edge.
    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn background(&self) -> Srgb<u8> {
        self.background
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }

    /// The area available to the scaled source once padding is removed.
    pub fn inner_bounds(&self) -> SizePx {
        SizePx::new(self.width - 2 * self.padding, self.height - 2 * self.padding)
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Computes where the scaled source lands inside the tile.
///
/// A source relatively wider than the tile is bound by the padded width;
/// otherwise (including equal aspect ratios) it is bound by the padded height.
/// The rectangle is centered, with any odd pixel going to the right/bottom.
pub fn tile_placement(source: SizePx, spec: &TileSpec) -> RectPx {
    let bounds = spec.inner_bounds();
    let source_aspect = source.aspect();
    let tile_aspect = spec.size().aspect();

    let (inner_w, inner_h) = if source_aspect > tile_aspect {
        let inner_w = bounds.width as f64;
        (inner_w, inner_w / source_aspect)
    } else {
        let inner_h = bounds.height as f64;
        (inner_h * source_aspect, inner_h)
    };

    let width = clamp_side(inner_w, bounds.width);
    let height = clamp_side(inner_h, bounds.height);
    let x = (spec.width - width) / 2;
    let y = (spec.height - height) / 2;

    RectPx::new(x, y, width, height)
}

fn clamp_side(value: f64, max: u32) -> u32 {
    (value.round() as u32).clamp(1, max)
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `source` into an opaque tile described by `spec`.
///
/// The returned canvas is exactly `spec.size()`. Transparent
/// areas of the source show the background color.
pub fn tile(source: RgbaImage, spec: &TileSpec) -> RgbaImage {
    let (width, height) = source.dimensions();
    let placement = tile_placement(SizePx::new(width, height), spec);
    debug!(
        "tiling {width}x{height} source into {} on {}: inner {} at ({}, {})",
        spec.size(),
        to_hex_string(spec.background),
        placement.size(),
        placement.x,
        placement.y
    );

    let mut canvas = RgbaImage::from_pixel(spec.width, spec.height, to_pixel(opaque(spec.background)));
    let scaled = resample(&source, placement.size());
    drop(source);
    composite_over(&mut canvas, &scaled, placement.x, placement.y);

    // Blending onto an opaque background already yields alpha 255; pin it
    // so float rounding can never leave a translucent pixel.
    for pixel in canvas.pixels_mut() {
        pixel[3] = u8::MAX;
    }
    canvas
}

// ============================================================================
// Tests
// ============================================================================
