use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::detection::Extraction;
use crate::error::Result;

pub const ORIGINAL_FILE_NAME: &str = "original.jpg";

/// File name for the region at 1-based `index`
pub fn region_file_name(index: usize) -> String {
    format!("region-{}.jpg", index)
}

/// Writes extracted regions and the source scan as JPEG files
pub struct OutputWriter {
    dir: PathBuf,
    quality: u8,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            dir: dir.into(),
            quality,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fail early if files cannot be created in the output directory.
    /// The scratch file is removed again on drop.
    pub fn ensure_writable(&self) -> Result<()> {
        tempfile::NamedTempFile::new_in(&self.dir)?;
        Ok(())
    }

    /// Encode `image` as JPEG at `path`
    pub fn write_image(&self, path: &Path, image: &DynamicImage) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
        writer.flush()?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// One `region-<n>.jpg` per extracted region
    pub fn write_regions(&self, extraction: &Extraction) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(extraction.regions.len());
        for region in &extraction.regions {
            let path = self.dir.join(region_file_name(region.index));
            self.write_image(&path, &region.image)?;
            written.push(path);
        }
        Ok(written)
    }

    pub fn write_original(&self, image: &DynamicImage) -> Result<PathBuf> {
        let path = self.dir.join(ORIGINAL_FILE_NAME);
        self.write_image(&path, image)?;
        Ok(path)
    }
}
