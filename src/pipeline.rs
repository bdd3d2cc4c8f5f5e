use image::{DynamicImage, GrayImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ExtractError, Result};

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// The directory must be empty or non-existent; it is created if missing
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(ExtractError::DebugDirNotEmpty(output_dir));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

/// Context available to all pipeline steps
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// One stage of the edge map producer
pub trait PipelineStep: Send + Sync {
    /// Transform the working image. Steps may change the pixel type;
    /// the pipeline converts the final image to a single channel.
    fn process(&self, image: DynamicImage, context: &PipelineContext) -> Result<DynamicImage>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

/// Composable edge map pipeline
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Save every step's output into `output_dir`
    pub fn with_debug(mut self, output_dir: impl Into<PathBuf>) -> Result<Self> {
        self.context.debug = Some(DebugConfig::new(output_dir)?);
        Ok(self)
    }

    pub fn with_debug_config(mut self, debug: Option<DebugConfig>) -> Self {
        self.context.debug = debug;
        self
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step on `input` and return the single-channel edge map.
    /// The edge map always has the input's dimensions.
    pub fn run(&self, input: &DynamicImage) -> Result<GrayImage> {
        self.run_partial(input, self.steps.len())
    }

    /// Run only the first `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: &DynamicImage, num_steps: usize) -> Result<GrayImage> {
        let mut image = input.clone();

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            info!("Running step: {}", step.name());
            image = step.process(image, &self.context)?;

            if let Some(debug_config) = &self.context.debug {
                let file_name = step_file_name(step_idx, step.name());
                save_debug_image(&image, &debug_config.path(&file_name))?;
                debug!("Debug: saved {}", file_name);
            }
        }

        Ok(image.into_luma8())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// e.g. `02_gaussian_blur.png`
fn step_file_name(step_idx: usize, step_name: &str) -> String {
    format!(
        "{:02}_{}.png",
        step_idx + 1,
        step_name.to_lowercase().replace(' ', "_")
    )
}

pub(crate) fn save_debug_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save(path)?;
    Ok(())
}
