//! Serializable generator configuration.
//!
//! A [`FaviconConfig`] names which platforms to target and how tiles and the
//! web app manifest look. It round-trips through JSON, rejects unknown keys,
//! and fills every omitted field with a default.
//!
//! # Example
//!
//! ```
//! use favicon_forge::{FaviconConfig, ManifestSettings};
//!
//! let config = FaviconConfig::new()
//!     .with_tile_background("#2b5797")
//!     .with_manifest(ManifestSettings {
//!         name: Some("Example".into()),
//!         theme_color: Some("#ffffff".into()),
//!         ..Default::default()
//!     });
//! config.validate().unwrap();
//!
//! let json = config.to_json().unwrap();
//! let restored = FaviconConfig::from_json(&json).unwrap();
//! assert_eq!(restored, config);
//! ```

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::parse_hex_color;
use crate::error::{FaviconError, Result};
use crate::sizes::{PlatformFlags, SizeEntry, SizeTable};
use crate::transform::TileSpec;

/// Default background of Windows tiles.
pub const DEFAULT_TILE_BACKGROUND: &str = "#ffffff";

/// Default padding of Windows tiles, in pixels.
pub const DEFAULT_TILE_PADDING: u32 = 8;

// ============================================================================
// ManifestSettings
// ============================================================================

/// Optional metadata written to `manifest.json`.
///
/// Empty or missing values are left out of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,

    /// Also used as the Windows `TileColor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// e.g. `standalone`, `fullscreen`, `minimal-ui`, `browser`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ManifestSettings {
    /// The theme color, if one is set and non-empty.
    pub fn theme_color(&self) -> Option<&str> {
        non_empty(&self.theme_color)
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn default_true() -> bool {
    true
}

fn default_tile_background() -> String {
    DEFAULT_TILE_BACKGROUND.to_string()
}

fn default_tile_padding() -> u32 {
    DEFAULT_TILE_PADDING
}

// ============================================================================
// FaviconConfig
// ============================================================================

/// Everything the generator needs besides the source and destination paths.
///
/// # JSON Format
///
/// ```json
/// {
///   "ico48": true,
///   "ico64": false,
///   "excludeOldApple": true,
///   "excludeAndroid": false,
///   "excludeMs": false,
///   "tileBackground": "#2b5797",
///   "tilePadding": 8,
///   "manifest": { "name": "Example", "themeColor": "#ffffff" },
///   "extraSizes": [{ "name": "favicon-128x128.png", "size": 128 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FaviconConfig {
    /// Embed a 48x48 frame in `favicon.ico`.
    #[serde(default = "default_true")]
    pub ico48: bool,

    /// Embed a 64x64 frame in `favicon.ico`.
    #[serde(default = "default_true")]
    pub ico64: bool,

    #[serde(default)]
    pub exclude_old_apple: bool,

    #[serde(default)]
    pub exclude_android: bool,

    #[serde(default)]
    pub exclude_ms: bool,

    /// Hex color behind Windows tiles.
    #[serde(default = "default_tile_background")]
    pub tile_background: String,

    /// Pixels between the tile edge and the scaled source.
    #[serde(default = "default_tile_padding")]
    pub tile_padding: u32,

    #[serde(default)]
    pub manifest: ManifestSettings,

    /// Additional PNG renditions appended to the size table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_sizes: Vec<SizeEntry>,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            ico48: true,
            ico64: true,
            exclude_old_apple: false,
            exclude_android: false,
            exclude_ms: false,
            tile_background: default_tile_background(),
            tile_padding: DEFAULT_TILE_PADDING,
            manifest: ManifestSettings::default(),
            extra_sizes: Vec::new(),
        }
    }
}

impl FaviconConfig {
    /// Creates a config with every platform enabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ico_sizes(mut self, ico48: bool, ico64: bool) -> Self {
        self.ico48 = ico48;
        self.ico64 = ico64;
        self
    }

    pub fn with_platforms(mut self, flags: PlatformFlags) -> Self {
        self.exclude_old_apple = flags.exclude_old_apple;
        self.exclude_android = flags.exclude_android;
        self.exclude_ms = flags.exclude_ms;
        self
    }

    pub fn with_tile_background(mut self, hex: impl Into<String>) -> Self {
        self.tile_background = hex.into();
        self
    }

    pub fn with_tile_padding(mut self, padding: u32) -> Self {
        self.tile_padding = padding;
        self
    }

    pub fn with_manifest(mut self, manifest: ManifestSettings) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_extra_size(mut self, entry: SizeEntry) -> Self {
        self.extra_sizes.push(entry);
        self
    }

    pub fn platform_flags(&self) -> PlatformFlags {
        PlatformFlags {
            exclude_old_apple: self.exclude_old_apple,
            exclude_android: self.exclude_android,
            exclude_ms: self.exclude_ms,
        }
    }

    /// Resolves the size table for this config.
    pub fn size_table(&self) -> Result<SizeTable> {
        SizeTable::resolve(&self.platform_flags(), &self.extra_sizes)
    }

    /// Parses the tile background color.
    pub fn tile_background_color(&self) -> Result<Srgb<u8>> {
        parse_hex_color(&self.tile_background)
    }

    /// Builds the tile spec for one tile rendition of `width x height`.
    pub fn tile_spec(&self, width: u32, height: u32) -> Result<TileSpec> {
        TileSpec::new(width, height, self.tile_padding, self.tile_background_color()?)
    }

    /// Checks everything that can be checked without touching the filesystem.
    ///
    /// The tile background must be a hex color, the theme color (when set)
    /// must be one too since it ends up in `browserconfig.xml`, the size table
    /// must resolve, and the padding must fit every tile in it.
    pub fn validate(&self) -> Result<()> {
        self.tile_background_color()?;
        if let Some(theme) = self.manifest.theme_color() {
            parse_hex_color(theme)?;
        }

        let table = self.size_table()?;
        for entry in table.tiles() {
            let size = entry.size.normalize();
            self.tile_spec(size.width, size.height).map_err(|e| match e {
                FaviconError::Config(message) => {
                    FaviconError::config(format!("{}: {message}", entry.name))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a config from a JSON string.
    ///
    /// Unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// JSON schema of the config format.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FaviconConfig)
    }
}

// ============================================================================
// Tests
// ============================================================================
