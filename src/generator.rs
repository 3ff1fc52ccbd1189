//! End-to-end favicon bundle generation.

use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use log::{debug, info};

use crate::codec::{check_capabilities, decode_file, encode_png, sniff_format};
use crate::config::FaviconConfig;
use crate::container::IconContainer;
use crate::error::{FaviconError, Result};
use crate::geometry::SizePx;
use crate::manifest::{browserconfig_xml, html_snippet, WebManifest};
use crate::sizes::SizeEntry;
use crate::transform::{square, tile};

/// Subdirectory of the destination that holds the generated files.
pub const FAVICON_DIR: &str = "favicon";

/// Name of the icon container, both inside [`FAVICON_DIR`] and at the root.
pub const ICO_NAME: &str = "favicon.ico";

/// Normalizes a destination directory string.
///
/// Both `/` and `\` become the platform separator and trailing separators
/// are removed. A destination made only of separators stays a single root
/// separator, and a drive root such as `C:\` keeps its separator.
pub fn normalize_destination(destination: &str) -> PathBuf {
    let unified: String = destination
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    let trimmed = unified.trim_end_matches(MAIN_SEPARATOR);
    let stripped = trimmed.len() < unified.len();

    if trimmed.is_empty() && stripped {
        PathBuf::from(MAIN_SEPARATOR.to_string())
    } else if stripped && is_drive_prefix(trimmed) {
        PathBuf::from(format!("{trimmed}{MAIN_SEPARATOR}"))
    } else {
        PathBuf::from(trimmed)
    }
}

fn is_drive_prefix(path: &str) -> bool {
    matches!(path.as_bytes(), [letter, b':'] if letter.is_ascii_alphabetic())
}

// ============================================================================
// FaviconGenerator
// ============================================================================

/// Produces a favicon bundle from one source image.
///
/// A run is fail-fast: the first error aborts it and nothing already written
/// is rolled back. [`produced`](Self::produced) lists the files written so far,
/// in order, including those of a failed run.
///
/// # Output layout
///
/// ```text
/// <dest>/favicon.ico
/// <dest>/favicon/favicon.ico
/// <dest>/favicon/<name>.png          one per size-table entry
/// <dest>/favicon/manifest.json       unless Android is excluded
/// <dest>/favicon/browserconfig.xml   unless Windows tiles are excluded
/// ```
///
/// # Example
///
/// ```no_run
/// use favicon_forge::{FaviconConfig, FaviconGenerator};
///
/// let mut generator = FaviconGenerator::new("logo.png", "public/", FaviconConfig::new());
/// generator.generate()?;
/// for path in generator.produced() {
///     println!("{}", path.display());
/// }
/// # Ok::<(), favicon_forge::FaviconError>(())
/// ```
#[derive(Debug)]
pub struct FaviconGenerator {
    source: PathBuf,
    destination: PathBuf,
    config: FaviconConfig,
    produced: Vec<PathBuf>,
}

impl FaviconGenerator {
    /// Creates a generator. Nothing touches the filesystem until
    /// [`generate`](Self::generate).
    pub fn new(source: impl Into<PathBuf>, destination: &str, config: FaviconConfig) -> Self {
        Self {
            source: source.into(),
            destination: normalize_destination(destination),
            config,
            produced: Vec::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The normalized destination root.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn config(&self) -> &FaviconConfig {
        &self.config
    }

    /// Files written so far, in write order.
    pub fn produced(&self) -> &[PathBuf] {
        &self.produced
    }

    /// The `favicon/` output directory.
    pub fn favicon_dir(&self) -> PathBuf {
        self.destination.join(FAVICON_DIR)
    }

    /// HTML tags referencing the files this generator produces.
    pub fn html_snippet(&self) -> String {
        html_snippet(&self.config)
    }

    /// Runs the whole pipeline.
    ///
    /// Every error is a [`FaviconError::Generator`] naming the path involved;
    /// the underlying error, if any, is its `source()`.
    pub fn generate(&mut self) -> Result<()> {
        self.produced.clear();
        self.config
            .validate()
            .map_err(|e| FaviconError::wrap(&self.source, "invalid configuration", e))?;

        self.setup()?;
        self.check_capabilities()?;
        self.generate_ico()?;
        self.generate_pngs()?;

        if !self.config.exclude_android {
            self.generate_manifest()?;
        }
        if !self.config.exclude_ms {
            self.generate_browserconfig()?;
        }

        info!(
            "generated {} files in {}",
            self.produced.len(),
            self.destination.display()
        );
        Ok(())
    }

    fn setup(&self) -> Result<()> {
        for dir in [self.destination.clone(), self.favicon_dir()] {
            fs::create_dir_all(&dir)
                .map_err(|e| FaviconError::wrap(&dir, "cannot create directory", e))?;
        }

        if self.source.as_os_str().is_empty() {
            return Err(FaviconError::generator(&self.source, "source path is empty"));
        }
        if !self.source.is_file() {
            return Err(FaviconError::generator(&self.source, "source image does not exist"));
        }
        Ok(())
    }

    fn check_capabilities(&self) -> Result<()> {
        let wrap = |e: FaviconError| FaviconError::wrap(&self.source, "cannot process source image", e);

        let bytes = fs::read(&self.source)
            .map_err(|e| FaviconError::wrap(&self.source, "cannot read source image", e))?;
        let format = sniff_format(&bytes, &self.source).map_err(wrap)?;
        check_capabilities(format).map_err(wrap)?;
        debug!("source {} is {format:?}", self.source.display());
        Ok(())
    }

    fn generate_ico(&mut self) -> Result<()> {
        let ico_path = self.favicon_dir().join(ICO_NAME);

        let mut container = IconContainer::new();
        let sizes = [(16, true), (48, self.config.ico48), (64, self.config.ico64)];
        for (side, _) in sizes.into_iter().filter(|&(_, enabled)| enabled) {
            container
                .add(&self.source, SizePx::square(side))
                .map_err(|e| FaviconError::wrap(&ico_path, "cannot add icon frame", e))?;
        }
        container.save(&ico_path).map_err(|e| rewrap(&ico_path, e))?;
        self.record(ico_path.clone())?;

        let root_copy = self.destination.join(ICO_NAME);
        fs::copy(&ico_path, &root_copy)
            .map_err(|e| FaviconError::wrap(&root_copy, "cannot copy icon file", e))?;
        self.record(root_copy)
    }

    fn generate_pngs(&mut self) -> Result<()> {
        let table = self
            .config
            .size_table()
            .map_err(|e| FaviconError::wrap(&self.source, "cannot resolve size table", e))?;

        for entry in &table {
            let path = self.favicon_dir().join(&entry.name);
            let image = self.render(entry).map_err(|e| rewrap(&path, e))?;
            let bytes = encode_png(&image)
                .map_err(|e| FaviconError::wrap(&path, "cannot encode PNG", e))?;
            drop(image);

            fs::write(&path, bytes).map_err(|e| FaviconError::wrap(&path, "cannot write PNG", e))?;
            self.record(path)?;
        }
        Ok(())
    }

    /// Decodes a fresh copy of the source and renders one size-table entry.
    fn render(&self, entry: &SizeEntry) -> Result<image::RgbaImage> {
        let size = entry.size.normalize();
        let source = decode_file(&self.source)?;

        if entry.is_tile() {
            let spec = self.config.tile_spec(size.width, size.height)?;
            Ok(tile(source, &spec))
        } else {
            Ok(square(source, size.width))
        }
    }

    fn generate_manifest(&mut self) -> Result<()> {
        let path = self.favicon_dir().join("manifest.json");
        let json = WebManifest::new(&self.config.manifest)
            .to_json_pretty()
            .map_err(|e| FaviconError::wrap(&path, "cannot serialize manifest", e))?;
        fs::write(&path, json).map_err(|e| FaviconError::wrap(&path, "cannot write manifest", e))?;
        self.record(path)
    }

    fn generate_browserconfig(&mut self) -> Result<()> {
        let path = self.favicon_dir().join("browserconfig.xml");
        let xml = browserconfig_xml(self.config.manifest.theme_color());
        fs::write(&path, xml)
            .map_err(|e| FaviconError::wrap(&path, "cannot write browser config", e))?;
        self.record(path)
    }

    /// Verifies that `path` now exists and appends it to the audit list.
    fn record(&mut self, path: PathBuf) -> Result<()> {
        if !path.is_file() {
            return Err(FaviconError::generator(&path, "file was not written"));
        }
        info!("wrote {}", path.display());
        self.produced.push(path);
        Ok(())
    }
}

/// Adds artifact context to an error, keeping generator errors that already
/// name a path (such as a failed source read) as they are.
fn rewrap(path: &Path, error: FaviconError) -> FaviconError {
    match error {
        FaviconError::Generator { .. } => error,
        other => FaviconError::wrap(path, "cannot render artifact", other),
    }
}

// ============================================================================
// Tests
// ============================================================================
