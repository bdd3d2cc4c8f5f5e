use thiserror::Error;

use crate::models::Rect;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised by the region extraction core
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Region does not fit inside the source image
    #[error("region {region} lies outside the {image_width}x{image_height} source image")]
    OutOfBounds {
        region: Rect,
        image_width: u32,
        image_height: u32,
    },

    #[error("invalid configuration: {parameter} {reason}")]
    InvalidConfig { parameter: String, reason: String },

    /// Debug output directory exists and already holds files
    #[error("debug directory is not empty: {0}")]
    DebugDirNotEmpty(std::path::PathBuf),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Errors local to one region; the rest of the image can still be processed
    pub fn is_region_local(&self) -> bool {
        matches!(self, ExtractError::OutOfBounds { .. })
    }
}
