use std::collections::VecDeque;
use std::io::{Cursor, Write as _};

use anyhow::Context as _;

use crate::foundation::error::{StudioError, StudioResult};
use crate::params::model::ShapeMode;
use crate::render::raster::RasterImage;

/// What produced a gallery image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryMeta {
    pub prompt: String,
    pub seed: u64,
    pub palette: String,
    pub mode: ShapeMode,
}

#[derive(Clone, Debug)]
pub struct GalleryEntry {
    pub png: Vec<u8>,
    pub meta: EntryMeta,
}

impl GalleryEntry {
    /// Standalone download name.
    pub fn file_name(&self) -> String {
        format!("gen_{}.png", self.meta.seed)
    }

    /// Name inside a gallery archive; `position` is 1-based.
    pub fn archive_name(&self, position: usize) -> String {
        format!("image_{position}_seed{}.png", self.meta.seed)
    }
}

/// In-memory, newest-first collection of encoded images with a fixed capacity.
#[derive(Clone, Debug)]
pub struct Gallery {
    capacity: usize,
    entries: VecDeque<GalleryEntry>,
}

impl Gallery {
    pub fn new(capacity: usize) -> StudioResult<Self> {
        if capacity == 0 {
            return Err(StudioError::validation("gallery capacity must be >= 1"));
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Encode `image` and insert it at the front, evicting the oldest entries beyond capacity.
    pub fn insert(&mut self, image: &RasterImage, meta: EntryMeta) -> StudioResult<()> {
        let png = image.encode_png()?;
        self.entries.push_front(GalleryEntry { png, meta });
        self.entries.truncate(self.capacity);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter()
    }

    /// Archive every entry, newest first, as `image_<n>_seed<seed>.png` with `n` counting
    /// from 1. PNGs are stored uncompressed.
    #[tracing::instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn export_zip(&self) -> StudioResult<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let opts = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (i, entry) in self.entries.iter().enumerate() {
            let name = entry.archive_name(i + 1);
            zip.start_file(name.as_str(), opts)
                .with_context(|| format!("start zip entry '{name}'"))?;
            zip.write_all(&entry.png)
                .with_context(|| format!("write zip entry '{name}'"))?;
        }
        let cursor = zip.finish().context("finish gallery zip")?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/studio/gallery.rs"]
mod tests;
