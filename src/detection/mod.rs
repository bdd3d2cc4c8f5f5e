pub mod preprocessing;
pub mod contours;
pub mod regions;
pub mod extract;
pub mod steps;

use image::{DynamicImage, GenericImageView};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::debug::DebugRenderer;
use crate::error::Result;
use crate::models::{Contour, Rect};
use crate::pipeline::{DebugConfig, Pipeline};

pub use extract::{Extraction, SkippedRegion, extract_region, extract_regions};

/// Finds and cuts out the photos on one scanned page.
///
/// Holds no state between runs; each call to [`RegionDetector::extract`]
/// works on its own copy of every intermediate.
pub struct RegionDetector {
    config: ExtractConfig,
    edges: Pipeline,
    debug: Option<DebugConfig>,
}

impl RegionDetector {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        let edges = steps::build_edge_pipeline(&config.edges);
        Ok(Self {
            config,
            edges,
            debug: None,
        })
    }

    /// Write intermediate images to `output_dir` (must be empty or absent)
    pub fn with_debug(mut self, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let debug = DebugConfig::new(output_dir)?;
        self.edges = steps::build_edge_pipeline(&self.config.edges)
            .with_debug_config(Some(debug.clone()));
        self.debug = Some(debug);
        Ok(self)
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Edge map, contours, rectangles and filtering; no cropping
    pub fn detect(&self, img: &DynamicImage) -> Result<Vec<Rect>> {
        let mut renderer = self.debug.clone().map(DebugRenderer::new);
        let size = img.dimensions();

        let contours = self.get_contours(img)?;
        if let Some(renderer) = renderer.as_mut() {
            renderer.save_contours("contours.png", size, &contours)?;
        }

        info!("Approximating contours with rectangular areas...");
        let candidates = regions::bounding_rects(&contours);
        for rect in &candidates {
            debug!("  candidate {}", rect);
        }
        if let Some(renderer) = renderer.as_mut() {
            renderer.save_rects("areas.png", size, &candidates, 2)?;
        }

        info!("Removing invalid rectangular areas...");
        let valid = regions::filter_regions(
            &candidates,
            self.config.min_width,
            self.config.min_height,
        );
        info!("{} of {} areas kept", valid.len(), candidates.len());
        for rect in &valid {
            debug!("  valid {}", rect);
        }
        if let Some(renderer) = renderer.as_mut() {
            renderer.save_rects("processed-areas.png", size, &valid, 3)?;
        }

        Ok(valid)
    }

    /// Run the whole pipeline and crop every surviving region
    pub fn extract(&self, img: &DynamicImage) -> Result<Extraction> {
        let valid = self.detect(img)?;

        info!("Extracting photos from rectangular areas...");
        Ok(extract_regions(img, &valid))
    }

    /// External contours of the edge map (for debugging)
    pub fn get_contours(&self, img: &DynamicImage) -> Result<Vec<Contour>> {
        let edges = self.edges.run(img)?;

        info!("Generating image contours...");
        let found = contours::find_external_contours(&edges);
        debug!("Found {} contours", found.len());
        Ok(found)
    }

    /// Unfiltered bounding rectangles (for debugging)
    pub fn get_candidates(&self, img: &DynamicImage) -> Result<Vec<Rect>> {
        Ok(regions::bounding_rects(&self.get_contours(img)?))
    }
}
