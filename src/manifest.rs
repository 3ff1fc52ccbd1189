//! Text artifacts: the Android `manifest.json`, the Windows
//! `browserconfig.xml`, and the HTML tags that reference the bundle.

use serde::Serialize;

use crate::config::{non_empty, FaviconConfig, ManifestSettings};
use crate::sizes::{ANDROID_SIZES, APPLE_SIZES, FAVICON_SIZES, OLD_APPLE_SIZES};

/// Public URL prefix of the generated files.
pub const FAVICON_URL_PREFIX: &str = "/favicon";

// ============================================================================
// Web App Manifest
// ============================================================================

/// One entry of the manifest `icons` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub density: f64,
}

impl ManifestIcon {
    /// Describes the Android Chrome icon of `size x size` pixels.
    pub fn android(size: u32) -> Self {
        Self {
            src: format!("{FAVICON_URL_PREFIX}/android-chrome-{size}x{size}.png"),
            sizes: format!("{size}x{size}"),
            mime_type: "image/png".to_string(),
            density: density(size),
        }
    }
}

/// Screen density of an icon relative to the 48px baseline, rounded to two
/// decimal places.
pub fn density(size: u32) -> f64 {
    (size as f64 / 48.0 * 100.0).round() / 100.0
}

/// The `manifest.json` document.
///
/// Field names follow the W3C web app manifest (snake_case).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    /// Builds the manifest, dropping empty settings.
    pub fn new(settings: &ManifestSettings) -> Self {
        let field = |value: &Option<String>| non_empty(value).map(str::to_string);
        Self {
            name: field(&settings.name),
            short_name: field(&settings.short_name),
            lang: field(&settings.lang),
            start_url: field(&settings.start_url),
            theme_color: field(&settings.theme_color),
            background_color: field(&settings.background_color),
            display: field(&settings.display),
            icons: ANDROID_SIZES.iter().map(|&size| ManifestIcon::android(size)).collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// browserconfig.xml
// ============================================================================

/// Renders `browserconfig.xml` for pinned sites on Windows.
///
/// `tile_color` becomes a `<TileColor>` element when given.
pub fn browserconfig_xml(tile_color: Option<&str>) -> String {
    let prefix = FAVICON_URL_PREFIX;
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<browserconfig>\n");
    xml.push_str("  <msapplication>\n");
    xml.push_str("    <tile>\n");
    xml.push_str(&format!("      <square70x70logo src=\"{prefix}/mstile-70x70.png\"/>\n"));
    xml.push_str(&format!("      <square150x150logo src=\"{prefix}/mstile-150x150.png\"/>\n"));
    xml.push_str(&format!("      <square310x310logo src=\"{prefix}/mstile-310x310.png\"/>\n"));
    xml.push_str(&format!("      <wide310x150logo src=\"{prefix}/mstile-310x150.png\"/>\n"));
    xml.push_str(&format!("      <TileImage src=\"{prefix}/mstile-144x144.png\"/>\n"));
    if let Some(color) = tile_color {
        xml.push_str(&format!("      <TileColor>{}</TileColor>\n", escape_markup(color)));
    }
    xml.push_str("    </tile>\n");
    xml.push_str("  </msapplication>\n");
    xml.push_str("</browserconfig>\n");
    xml
}

// ============================================================================
// HTML
// ============================================================================

/// Renders the `<link>`/`<meta>` tags for the platforms `config` enables.
pub fn html_snippet(config: &FaviconConfig) -> String {
    let prefix = FAVICON_URL_PREFIX;
    let mut tags = vec!["<link rel=\"shortcut icon\" href=\"/favicon.ico\">".to_string()];

    let mut apple = APPLE_SIZES.to_vec();
    if !config.exclude_old_apple {
        apple.extend(OLD_APPLE_SIZES);
        apple.sort_unstable();
    }
    for size in apple {
        tags.push(format!(
            "<link rel=\"apple-touch-icon\" sizes=\"{size}x{size}\" href=\"{prefix}/apple-touch-icon-{size}x{size}.png\">"
        ));
    }

    for size in FAVICON_SIZES {
        tags.push(format!(
            "<link rel=\"icon\" type=\"image/png\" sizes=\"{size}x{size}\" href=\"{prefix}/favicon-{size}x{size}.png\">"
        ));
    }

    if !config.exclude_android {
        tags.push(format!(
            "<link rel=\"icon\" type=\"image/png\" sizes=\"192x192\" href=\"{prefix}/android-chrome-192x192.png\">"
        ));
        tags.push(format!("<link rel=\"manifest\" href=\"{prefix}/manifest.json\">"));
    }

    let theme = config.manifest.theme_color().map(escape_markup);
    if !config.exclude_ms {
        tags.push(format!(
            "<meta name=\"msapplication-TileImage\" content=\"{prefix}/mstile-144x144.png\">"
        ));
        tags.push(format!(
            "<meta name=\"msapplication-config\" content=\"{prefix}/browserconfig.xml\">"
        ));
        if let Some(theme) = &theme {
            tags.push(format!("<meta name=\"msapplication-TileColor\" content=\"{theme}\">"));
        }
    }
    if let Some(theme) = &theme {
        tags.push(format!("<meta name=\"theme-color\" content=\"{theme}\">"));
    }

    let mut html = tags.join("\n");
    html.push('\n');
    html
}

fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
