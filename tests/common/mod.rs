mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from photosplit for tests
pub use photosplit::{
    EdgeConfig, EdgeDetector, ExtractConfig, ExtractError, Extraction, OutputWriter, Rect,
    RegionDetector,
};
