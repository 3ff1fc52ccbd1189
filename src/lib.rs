//! favicon-forge: favicon bundle generation from a single source image
//!
//! This crate turns one PNG, JPEG or GIF into everything a web site needs
//! for its icons: a multi-resolution `favicon.ico`, PNG renditions for
//! browsers, Apple, Android and Windows, a web app `manifest.json` and a
//! Windows `browserconfig.xml`.
//!
//! # Example
//!
//! ```no_run
//! use favicon_forge::{FaviconConfig, FaviconGenerator, ManifestSettings};
//!
//! let config = FaviconConfig::new()
//!     .with_tile_background("#2b5797")
//!     .with_manifest(ManifestSettings {
//!         name: Some("Example".into()),
//!         theme_color: Some("#ffffff".into()),
//!         ..Default::default()
//!     });
//!
//! let mut generator = FaviconGenerator::new("logo.png", "public", config);
//! generator.generate()?;
//! println!("{}", generator.html_snippet());
//! # Ok::<(), favicon_forge::FaviconError>(())
//! ```
//!
//! # Transforms
//!
//! The image operations are usable on their own. They take an
//! [`image::RgbaImage`] by value and return a new one:
//!
//! ```
//! use favicon_forge::{parse_hex_color, square, tile, TileSpec};
//! use image::RgbaImage;
//!
//! let scaled = square(RgbaImage::new(800, 400), 100);
//! assert_eq!(scaled.dimensions(), (100, 50));
//!
//! let spec = TileSpec::new(310, 150, 10, parse_hex_color("#fff").unwrap()).unwrap();
//! let tiled = tile(RgbaImage::new(1000, 500), &spec);
//! assert_eq!(tiled.dimensions(), (310, 150));
//! ```

mod codec;
mod color;
mod config;
mod container;
mod error;
mod generator;
mod geometry;
mod manifest;
mod sizes;
mod transform;

pub use codec::{check_capabilities, decode, decode_file, encode_png, sniff_format, SUPPORTED_SOURCES};
pub use color::{parse_hex_color, to_hex_string};
pub use config::{FaviconConfig, ManifestSettings, DEFAULT_TILE_BACKGROUND, DEFAULT_TILE_PADDING};
pub use container::{IconContainer, MAX_ICO_SIDE};
pub use error::{FaviconError, Result};
pub use generator::{normalize_destination, FaviconGenerator, FAVICON_DIR, ICO_NAME};
pub use geometry::{RectPx, SizePx};
pub use manifest::{browserconfig_xml, density, html_snippet, ManifestIcon, WebManifest};
pub use sizes::{Dimension, PlatformFlags, SizeEntry, SizeTable, ANDROID_SIZES};
pub use transform::{resize, square, square_canvas, square_target, tile, tile_placement, TileSpec};
