//! Source decoding, PNG encoding and codec capability checks.
//!
//! Sources are sniffed by their leading bytes rather than by extension. Only
//! PNG, JPEG and GIF are accepted; GIFs contribute their first frame.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{FaviconError, Result};

/// Source formats the generator accepts.
pub const SUPPORTED_SOURCES: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif];

/// Identifies the format of `bytes` from its signature.
///
/// Fails with [`FaviconError::UnsupportedFormat`] (naming `path`) for anything
/// other than PNG, JPEG or GIF.
pub fn sniff_format(bytes: &[u8], path: &Path) -> Result<ImageFormat> {
    let unsupported = || FaviconError::UnsupportedFormat {
        path: path.to_path_buf(),
    };
    let format = image::guess_format(bytes).map_err(|_| unsupported())?;
    if SUPPORTED_SOURCES.contains(&format) {
        Ok(format)
    } else {
        Err(unsupported())
    }
}

/// Lists the codec support missing for decoding `source` and writing PNGs.
///
/// Formats are cargo features, so a build without e.g. `gif` reports
/// `"GIF decoder"` here instead of failing halfway through a run.
pub fn missing_capabilities(source: ImageFormat) -> Vec<String> {
    let mut missing = Vec::new();
    if !source.reading_enabled() {
        missing.push(format!("{} decoder", format_name(source)));
    }
    if !ImageFormat::Png.writing_enabled() {
        missing.push("PNG encoder".to_string());
    }
    missing
}

/// Fails with [`FaviconError::MissingCapability`] if [`missing_capabilities`]
/// reports anything.
pub fn check_capabilities(source: ImageFormat) -> Result<()> {
    let missing = missing_capabilities(source);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FaviconError::MissingCapability(missing))
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Gif => "GIF",
        _ => "image",
    }
}

/// Reads and decodes the image at `path` into straight-alpha RGBA.
pub fn decode_file(path: &Path) -> Result<RgbaImage> {
    let bytes = fs::read(path).map_err(|e| FaviconError::wrap(path, "cannot read source image", e))?;
    decode(&bytes, path)
}

/// Decodes an in-memory image; `path` is only used for error context.
pub fn decode(bytes: &[u8], path: &Path) -> Result<RgbaImage> {
    let format = sniff_format(bytes, path)?;
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| FaviconError::wrap(path, "cannot decode source image", e))?;
    Ok(image.to_rgba8())
}

/// Encodes an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        encode_png(&RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 200]))).unwrap()
    }

    #[test]
    fn sniffs_png() {
        let format = sniff_format(&png_bytes(2, 2), Path::new("a.png")).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn sniffs_gif_and_jpeg_signatures() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";
        assert_eq!(sniff_format(gif, Path::new("x")).unwrap(), ImageFormat::Gif);

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(sniff_format(&jpeg, Path::new("x")).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn rejects_other_signatures() {
        // BMP is recognized by `image` but not an accepted source.
        let bmp = b"BM\x00\x00\x00\x00\x00\x00\x00\x00";
        let err = sniff_format(bmp, Path::new("logo.bmp")).unwrap_err();
        assert!(matches!(err, FaviconError::UnsupportedFormat { ref path } if path == Path::new("logo.bmp")));

        let err = sniff_format(b"hello world", Path::new("logo.png")).unwrap_err();
        assert!(matches!(err, FaviconError::UnsupportedFormat { .. }));
    }

    #[test]
    fn decode_keeps_alpha() {
        let image = decode(&png_bytes(3, 2), Path::new("a.png")).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3, 200]);
    }

    #[test]
    fn truncated_png_is_a_generator_error() {
        let mut bytes = png_bytes(4, 4);
        bytes.truncate(bytes.len() / 2);
        let err = decode(&bytes, Path::new("broken.png")).unwrap_err();
        assert!(matches!(err, FaviconError::Generator { .. }));
        assert_eq!(err.path(), Some(Path::new("broken.png")));
    }

    #[test]
    fn png_encoding_is_available() {
        assert!(missing_capabilities(ImageFormat::Png).is_empty());
        assert!(check_capabilities(ImageFormat::Png).is_ok());
    }

    #[test]
    fn encoding_is_deterministic() {
        let image = RgbaImage::from_fn(9, 9, |x, y| Rgba([x as u8 * 20, y as u8 * 20, 0, 255]));
        assert_eq!(encode_png(&image).unwrap(), encode_png(&image).unwrap());
    }
}
