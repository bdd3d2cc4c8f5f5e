use anyhow::Context;
use clap::{Parser, ValueEnum};
use image::{GenericImageView, ImageReader};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use photosplit::{EdgeDetector, ExtractConfig, OutputWriter, RegionDetector};

#[derive(Parser)]
#[command(name = "photosplit")]
#[command(about = "Split a flatbed scan of several photos into one file per photo")]
struct Cli {
    /// Path to the scanned image
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Existing directory that receives the extracted photos
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum region width in pixels
    #[arg(long)]
    min_width: Option<u32>,

    /// Minimum region height in pixels
    #[arg(long)]
    min_height: Option<u32>,

    /// Edge detection algorithm
    #[arg(long, value_enum)]
    edge: Option<EdgeKind>,

    /// Binarize the edge map, optionally at a given level
    #[arg(long, value_name = "LEVEL", num_args = 0..=1)]
    threshold: Option<Option<u8>>,

    /// All-ones convolution after thresholding, optionally with a given kernel size
    #[arg(long, value_name = "SIZE", num_args = 0..=1)]
    convolution: Option<Option<u32>>,

    /// JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u8>,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EdgeKind {
    Canny,
    Laplacian,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => ExtractConfig::default(),
        };

        if let Some(min_width) = self.min_width {
            config.min_width = min_width;
        }
        if let Some(min_height) = self.min_height {
            config.min_height = min_height;
        }
        match self.edge {
            Some(EdgeKind::Canny) => {
                if !matches!(config.edges.detector, EdgeDetector::Canny { .. }) {
                    config.edges.detector = EdgeDetector::canny();
                }
            }
            Some(EdgeKind::Laplacian) => config.edges.detector = EdgeDetector::Laplacian,
            None => {}
        }
        if let Some(level) = self.threshold {
            config.edges.enable_threshold(level);
        }
        if let Some(size) = self.convolution {
            config.edges.enable_convolution(size);
        }
        if let Some(quality) = self.quality {
            config.jpeg_quality = quality;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = args.resolve_config()?;

    if !args.output_dir.is_dir() {
        anyhow::bail!("Directory \"{}\" does not exist", args.output_dir.display());
    }
    let writer = OutputWriter::new(&args.output_dir, config.jpeg_quality);
    writer
        .ensure_writable()
        .with_context(|| format!("Directory \"{}\" is not writable", args.output_dir.display()))?;

    info!("Loading image: {:?}", args.image_path);
    let img = ImageReader::open(&args.image_path)
        .with_context(|| format!("Could not read image \"{}\"", args.image_path.display()))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    let (width, height) = img.dimensions();
    info!("Image loaded: {}x{}", width, height);

    let mut detector = RegionDetector::new(config)?;
    if let Some(debug_dir) = args.debug_out {
        detector = detector.with_debug(debug_dir)?;
    }

    let extraction = detector.extract(&img)?;

    let written = writer.write_regions(&extraction)?;
    writer.write_original(&img)?;

    if extraction.is_empty() {
        warn!("No photos found; only the original image was written");
    }
    for skipped in &extraction.skipped {
        warn!("Region {} {} skipped: {}", skipped.index, skipped.rect, skipped.error);
    }

    println!(
        "{} photos written to {}, {} skipped",
        written.len(),
        writer.dir().display(),
        extraction.skipped_count()
    );

    Ok(())
}
