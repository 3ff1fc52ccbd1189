//! Multi-resolution `.ico` writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use log::debug;

use crate::codec::decode_file;
use crate::error::{FaviconError, Result};
use crate::geometry::SizePx;
use crate::transform::square_canvas;

/// Largest frame the ICO format can describe.
pub const MAX_ICO_SIDE: u32 = 256;

/// Collects `(source, size)` pairs and writes them as one icon file.
///
/// Each entry decodes its own source when the container is saved, so no
/// pixel data is held between `add` and `save`.
#[derive(Debug, Clone, Default)]
pub struct IconContainer {
    entries: Vec<(PathBuf, SizePx)>,
}

impl IconContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame of `size` rendered from the image at `source`.
    ///
    /// Fails with [`FaviconError::Config`] for frames that are not square or
    /// do not fit the ICO format.
    pub fn add(&mut self, source: impl AsRef<Path>, size: SizePx) -> Result<()> {
        if !size.is_square() || size.width == 0 || size.width > MAX_ICO_SIDE {
            return Err(FaviconError::config(format!(
                "icon frames must be square and at most {MAX_ICO_SIDE}px, got {size}"
            )));
        }
        self.entries.push((source.as_ref().to_path_buf(), size));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frame sizes in insertion order.
    pub fn sizes(&self) -> impl Iterator<Item = SizePx> + '_ {
        self.entries.iter().map(|(_, size)| *size)
    }

    /// Renders every queued frame and writes the container to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut icon_dir = IconDir::new(ResourceType::Icon);

        for (source, size) in &self.entries {
            let frame = square_canvas(decode_file(source)?, size.width);
            debug!("adding {size} frame from {}", source.display());

            let image = IconImage::from_rgba_data(size.width, size.height, frame.into_raw());
            let entry = IconDirEntry::encode(&image)
                .map_err(|e| FaviconError::wrap(path, format!("cannot encode {size} icon frame"), e))?;
            icon_dir.add_entry(entry);
        }

        let file = File::create(path).map_err(|e| FaviconError::wrap(path, "cannot create icon file", e))?;
        let mut writer = BufWriter::new(file);
        icon_dir
            .write(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|e| FaviconError::wrap(path, "cannot write icon file", e))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
