//! The table of PNG renditions to generate.
//!
//! The table is an ordered list of `(file name, dimension)` pairs built from
//! fixed per-platform groups. Platforms can be switched off through
//! [`PlatformFlags`], and configuration may append extra renditions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FaviconError, Result};
use crate::geometry::SizePx;

/// Sizes referenced by the Android web app manifest.
pub const ANDROID_SIZES: [u32; 6] = [36, 48, 72, 96, 144, 192];

/// Plain browser favicons.
pub const FAVICON_SIZES: [u32; 4] = [16, 32, 96, 194];
/// Apple touch icons for iOS 7 and later.
pub const APPLE_SIZES: [u32; 5] = [60, 76, 120, 152, 180];
/// Apple touch icons for iOS 6 and earlier.
pub const OLD_APPLE_SIZES: [u32; 4] = [57, 72, 114, 144];

/// Prefix of Windows tile renditions.
pub const MSTILE_PREFIX: &str = "mstile";

// ============================================================================
// Dimension
// ============================================================================

/// Size of a rendition: a single side for squares, or an explicit pair.
///
/// Serializes as either `48` or `[310, 150]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum Dimension {
    Square(u32),
    Rect(u32, u32),
}

impl Dimension {
    /// Expands a scalar size to `(size, size)`.
    pub fn normalize(self) -> SizePx {
        match self {
            Self::Square(side) => SizePx::square(side),
            Self::Rect(width, height) => SizePx::new(width, height),
        }
    }
}

// ============================================================================
// SizeEntry
// ============================================================================

/// One named rendition of the source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SizeEntry {
    /// Output file name inside the `favicon/` directory, e.g. `favicon-32x32.png`.
    pub name: String,
    pub size: Dimension,
}

impl SizeEntry {
    pub fn new(name: impl Into<String>, size: Dimension) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    fn square(name: impl Into<String>, side: u32) -> Self {
        Self::new(name, Dimension::Square(side))
    }

    /// Windows tiles get composited onto the tile background, except the
    /// 144px `TileImage`, which is a plain scaled rendition.
    pub fn is_tile(&self) -> bool {
        self.name.starts_with(MSTILE_PREFIX) && self.size.normalize().width != 144
    }
}

// ============================================================================
// PlatformFlags
// ============================================================================

/// Which platform-specific groups to leave out of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformFlags {
    /// Skip pre-iOS 7 touch icons.
    pub exclude_old_apple: bool,
    /// Skip Android Chrome icons and `manifest.json`.
    pub exclude_android: bool,
    /// Skip Windows tiles and `browserconfig.xml`.
    pub exclude_ms: bool,
}

// ============================================================================
// SizeTable
// ============================================================================

/// Ordered list of renditions. Order decides write order only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeTable {
    entries: Vec<SizeEntry>,
}

impl SizeTable {
    /// Builds the table for the given platforms, followed by `extra` entries.
    ///
    /// Fails with [`FaviconError::Config`] if an extra entry is not a plain
    /// `.png` file name, has a zero dimension, or reuses an earlier name.
    pub fn resolve(flags: &PlatformFlags, extra: &[SizeEntry]) -> Result<Self> {
        let mut entries = Vec::new();

        for side in FAVICON_SIZES {
            entries.push(SizeEntry::square(format!("favicon-{side}x{side}.png"), side));
        }
        for side in APPLE_SIZES {
            entries.push(SizeEntry::square(format!("apple-touch-icon-{side}x{side}.png"), side));
        }
        entries.push(SizeEntry::square("apple-touch-icon.png", 180));

        if !flags.exclude_old_apple {
            for side in OLD_APPLE_SIZES {
                entries.push(SizeEntry::square(format!("apple-touch-icon-{side}x{side}.png"), side));
            }
            entries.push(SizeEntry::square("apple-touch-icon-precomposed.png", 57));
        }

        if !flags.exclude_android {
            for side in ANDROID_SIZES {
                entries.push(SizeEntry::square(format!("android-chrome-{side}x{side}.png"), side));
            }
        }

        if !flags.exclude_ms {
            for side in [70, 144, 150, 310] {
                entries.push(SizeEntry::square(format!("mstile-{side}x{side}.png"), side));
            }
            entries.push(SizeEntry::new("mstile-310x150.png", Dimension::Rect(310, 150)));
        }

        let mut table = Self { entries };
        for entry in extra {
            table.push_extra(entry.clone())?;
        }
        Ok(table)
    }

    fn push_extra(&mut self, entry: SizeEntry) -> Result<()> {
        let name = entry.name.as_str();
        if name.is_empty() {
            return Err(FaviconError::config("extra size has an empty name"));
        }
        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(FaviconError::config(format!(
                "extra size name {name:?} must be a plain file name"
            )));
        }
        if !name.ends_with(".png") {
            return Err(FaviconError::config(format!(
                "extra size name {name:?} must end in .png"
            )));
        }
        if !entry.size.normalize().is_positive() {
            return Err(FaviconError::config(format!(
                "extra size {name:?} has a zero dimension"
            )));
        }
        if self.get(name).is_some() {
            return Err(FaviconError::config(format!(
                "extra size {name:?} duplicates an existing entry"
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SizeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries that are composited as Windows tiles.
    pub fn tiles(&self) -> impl Iterator<Item = &SizeEntry> {
        self.entries.iter().filter(|entry| entry.is_tile())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeEntry> {
        self.entries.iter()
    }

    /// Returns true if no two entries share a name.
    pub fn names_are_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.entries.iter().all(|entry| seen.insert(entry.name.as_str()))
    }
}

impl<'a> IntoIterator for &'a SizeTable {
    type Item = &'a SizeEntry;
    type IntoIter = std::slice::Iter<'a, SizeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
