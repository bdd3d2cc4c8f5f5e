pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;

pub use config::{EdgeConfig, EdgeDetector, ExtractConfig};
pub use detection::{Extraction, RegionDetector, SkippedRegion};
pub use error::{ExtractError, Result};
pub use models::{Contour, Point, Rect, Region};
pub use output::OutputWriter;
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineStep};
