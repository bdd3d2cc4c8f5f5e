use crate::config::{EdgeConfig, EdgeDetector};
use crate::detection::preprocessing;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineContext, PipelineStep};
use image::DynamicImage;
use std::sync::Arc;
use tracing::info;

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        info!("Converting image to grayscale...");
        Ok(DynamicImage::ImageLuma8(preprocessing::to_grayscale(&image)))
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Apply Gaussian blur
pub struct BlurStep {
    pub sigma: f32,
}

impl PipelineStep for BlurStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        info!("Applying Gaussian blur [sigma={}]...", self.sigma);
        let gray = image.into_luma8();
        Ok(DynamicImage::ImageLuma8(preprocessing::apply_blur(&gray, self.sigma)))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Detect edges with the configured algorithm
pub struct EdgeDetectionStep {
    pub detector: EdgeDetector,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        info!("Using {} algorithm for edge detection...", self.detector.name());
        let gray = image.into_luma8();
        let edges = match self.detector {
            EdgeDetector::Canny { low, high } => preprocessing::detect_edges_canny(&gray, low, high),
            EdgeDetector::Laplacian => preprocessing::detect_edges_laplacian(&gray),
        };
        Ok(DynamicImage::ImageLuma8(edges))
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Binarize the edge map
pub struct ThresholdStep {
    pub level: u8,
}

impl PipelineStep for ThresholdStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        info!("Thresholding edges [level={}]...", self.level);
        let gray = image.into_luma8();
        Ok(DynamicImage::ImageLuma8(preprocessing::threshold_binary(&gray, self.level)))
    }

    fn name(&self) -> &str {
        "Threshold"
    }
}

/// Thicken edges with an all-ones convolution
pub struct ConvolutionStep {
    pub kernel_size: u32,
}

impl PipelineStep for ConvolutionStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        info!("Applying convolution [kernel_size={}]...", self.kernel_size);
        let gray = image.into_luma8();
        Ok(DynamicImage::ImageLuma8(preprocessing::box_convolve(&gray, self.kernel_size)))
    }

    fn name(&self) -> &str {
        "Convolution"
    }
}

/// Build the edge map producer described by `config`
pub fn build_edge_pipeline(config: &EdgeConfig) -> Pipeline {
    let mut pipeline = Pipeline::new().add_step(Arc::new(GrayscaleStep));

    if let Some(sigma) = config.blur {
        pipeline = pipeline.add_step(Arc::new(BlurStep { sigma }));
    }

    pipeline = pipeline.add_step(Arc::new(EdgeDetectionStep {
        detector: config.detector,
    }));

    if let Some(level) = config.threshold {
        pipeline = pipeline.add_step(Arc::new(ThresholdStep { level }));
    }

    if let Some(kernel_size) = config.effective_convolution() {
        pipeline = pipeline.add_step(Arc::new(ConvolutionStep { kernel_size }));
    }

    pipeline
}
