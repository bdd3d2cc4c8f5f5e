use image::{DynamicImage, GenericImageView};
use tracing::warn;

use crate::error::{ExtractError, Result};
use crate::models::{Rect, Region};

/// Regions cut out of one scan, plus those that could not be cut
#[derive(Debug, Default)]
pub struct Extraction {
    pub regions: Vec<Region>,
    pub skipped: Vec<SkippedRegion>,
}

#[derive(Debug)]
pub struct SkippedRegion {
    /// 1-based position in the valid set
    pub index: usize,
    pub rect: Rect,
    pub error: ExtractError,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Copy the pixels under `rect` out of `img`, unchanged. The bottom-right
/// corner is included, so the crop is `(width + 1) x (height + 1)`.
pub fn extract_region(img: &DynamicImage, rect: &Rect) -> Result<DynamicImage> {
    let (width, height) = img.dimensions();
    if !rect.fits_within(width, height) {
        return Err(ExtractError::OutOfBounds {
            region: *rect,
            image_width: width,
            image_height: height,
        });
    }

    let (crop_width, crop_height) = rect.pixel_extent();
    Ok(img.crop_imm(rect.x, rect.y, crop_width, crop_height))
}

/// Crop every rectangle in order. A rectangle that does not fit is
/// recorded as skipped and the rest are still processed.
pub fn extract_regions(img: &DynamicImage, rects: &[Rect]) -> Extraction {
    let mut extraction = Extraction::default();

    for (i, rect) in rects.iter().enumerate() {
        let index = i + 1;
        match extract_region(img, rect) {
            Ok(image) => extraction.regions.push(Region {
                index,
                rect: *rect,
                image,
            }),
            Err(error) => {
                warn!("Skipping region {} {}: {}", index, rect, error);
                extraction.skipped.push(SkippedRegion {
                    index,
                    rect: *rect,
                    error,
                });
            }
        }
    }

    extraction
}
