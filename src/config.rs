//! Tunable parameters for region extraction.
//!
//! Everything is resolved once at startup, either from [`ExtractConfig::default`]
//! or a JSON file, and then handed to the detector.
//!
//! ```no_run
//! use photosplit::ExtractConfig;
//! use std::path::Path;
//!
//! let config = ExtractConfig::from_json_file(Path::new("photosplit.json"))?;
//! config.validate()?;
//! # Ok::<(), photosplit::ExtractError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ExtractError, Result};

pub const DEFAULT_BLUR_SIGMA: f32 = 0.8;
pub const DEFAULT_CANNY_LOW: f32 = 40.0;
pub const DEFAULT_CANNY_RATIO: f32 = 3.0;
pub const DEFAULT_THRESHOLD: u8 = 16;
pub const DEFAULT_CONVOLUTION_KERNEL: u32 = 3;
pub const DEFAULT_MIN_WIDTH: u32 = 32;
pub const DEFAULT_MIN_HEIGHT: u32 = 32;
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Complete configuration for one extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Edge map production
    pub edges: EdgeConfig,

    /// Regions narrower than this are discarded
    pub min_width: u32,

    /// Regions shorter than this are discarded
    pub min_height: u32,

    /// JPEG quality for written files (1-100)
    pub jpeg_quality: u8,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            edges: EdgeConfig::default(),
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExtractConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ExtractError::invalid_config(
                "jpeg_quality",
                format!("must be within 1..=100, got {}", self.jpeg_quality),
            ));
        }
        self.edges.validate()
    }
}

/// Edge map producer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Gaussian blur sigma; `None` skips the blur
    pub blur: Option<f32>,

    pub detector: EdgeDetector,

    /// Binary threshold applied to the edge map; `None` keeps raw magnitudes
    pub threshold: Option<u8>,

    /// Side of the all-ones convolution kernel run after thresholding.
    /// Ignored when `threshold` is off.
    pub convolution: Option<u32>,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            blur: Some(DEFAULT_BLUR_SIGMA),
            detector: EdgeDetector::Laplacian,
            threshold: None,
            convolution: None,
        }
    }
}

impl EdgeConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(sigma) = self.blur {
            if !(sigma > 0.0) {
                return Err(ExtractError::invalid_config(
                    "edges.blur",
                    format!("sigma must be positive, got {}", sigma),
                ));
            }
        }

        if let EdgeDetector::Canny { low, high } = self.detector {
            if low < 0.0 || low > high {
                return Err(ExtractError::invalid_config(
                    "edges.detector",
                    format!("canny thresholds need 0 <= low <= high, got {} / {}", low, high),
                ));
            }
        }

        if self.convolution == Some(0) {
            return Err(ExtractError::invalid_config(
                "edges.convolution",
                "kernel size must be at least 1",
            ));
        }

        Ok(())
    }

    /// Turn thresholding on, at `level` or the default level
    pub fn enable_threshold(&mut self, level: Option<u8>) {
        self.threshold = Some(level.unwrap_or(DEFAULT_THRESHOLD));
    }

    /// Turn the post-threshold convolution on, with `size` or the default kernel
    pub fn enable_convolution(&mut self, size: Option<u32>) {
        self.convolution = Some(size.unwrap_or(DEFAULT_CONVOLUTION_KERNEL));
    }

    /// Convolution kernel size, only when thresholding is on
    pub fn effective_convolution(&self) -> Option<u32> {
        self.threshold.and(self.convolution)
    }
}

/// Edge detection algorithm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeDetector {
    Canny { low: f32, high: f32 },
    Laplacian,
}

impl EdgeDetector {
    pub fn canny() -> Self {
        EdgeDetector::Canny {
            low: DEFAULT_CANNY_LOW,
            high: DEFAULT_CANNY_LOW * DEFAULT_CANNY_RATIO,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EdgeDetector::Canny { .. } => "Canny",
            EdgeDetector::Laplacian => "Laplacian",
        }
    }
}
