//! Tests for the edge map pipeline and its preprocessing steps.

mod common;

use image::{DynamicImage, GrayImage, Luma};
use photosplit::detection::contours::find_external_contours;
use photosplit::detection::preprocessing::{box_convolve, detect_edges_laplacian, threshold_binary};
use photosplit::detection::steps::*;
use photosplit::Pipeline;
use std::sync::Arc;

use common::*;

#[test]
fn test_default_pipeline_steps() {
    let pipeline = build_edge_pipeline(&EdgeConfig::default());
    assert_eq!(
        pipeline.step_names(),
        vec!["Grayscale Conversion", "Gaussian Blur", "Edge Detection"]
    );
}

#[test]
fn test_full_pipeline_steps() {
    let edges = EdgeConfig {
        blur: None,
        detector: EdgeDetector::canny(),
        threshold: Some(16),
        convolution: Some(3),
    };
    let pipeline = build_edge_pipeline(&edges);
    assert_eq!(
        pipeline.step_names(),
        vec!["Grayscale Conversion", "Edge Detection", "Threshold", "Convolution"]
    );
}

#[test]
fn test_edge_map_keeps_dimensions() -> anyhow::Result<()> {
    let scan = create_test_scan();
    for detector in [EdgeDetector::Laplacian, EdgeDetector::canny()] {
        let edges = EdgeConfig {
            detector,
            ..EdgeConfig::default()
        };
        let map = build_edge_pipeline(&edges).run(&scan)?;
        assert_eq!(map.dimensions(), (SCAN_WIDTH, SCAN_HEIGHT));
    }
    Ok(())
}

#[test]
fn test_edge_map_is_deterministic() -> anyhow::Result<()> {
    let scan = create_test_scan();
    let pipeline = build_edge_pipeline(&EdgeConfig::default());
    assert_eq!(pipeline.run(&scan)?, pipeline.run(&scan)?);
    Ok(())
}

#[test]
fn test_run_partial_stops_early() -> anyhow::Result<()> {
    let scan = create_test_scan();
    let pipeline = Pipeline::new()
        .add_step(Arc::new(GrayscaleStep))
        .add_step_boxed(Box::new(ThresholdStep { level: 128 }));

    let gray = pipeline.run_partial(&scan, 1)?;
    assert_eq!(gray, scan.to_luma8());
    Ok(())
}

#[test]
fn test_laplacian_is_zero_on_flat_image() {
    let flat = GrayImage::from_pixel(20, 20, Luma([200]));
    assert!(detect_edges_laplacian(&flat).pixels().all(|p| p[0] == 0));
}

#[test]
fn test_threshold_is_binary() {
    let img = GrayImage::from_fn(4, 1, |x, _| Luma([[0, 16, 17, 255][x as usize]]));
    let out = threshold_binary(&img, 16);
    let values: Vec<u8> = out.pixels().map(|p| p[0]).collect();
    assert_eq!(values, vec![0, 0, 255, 255]);
}

#[test]
fn test_box_convolve_sums_and_saturates() {
    let mut img = GrayImage::new(5, 5);
    img.put_pixel(2, 2, Luma([50]));
    let out = box_convolve(&img, 3);
    assert_eq!(out.get_pixel(1, 1)[0], 50);
    assert_eq!(out.get_pixel(2, 2)[0], 50);
    assert_eq!(out.get_pixel(0, 0)[0], 0);

    let bright = GrayImage::from_pixel(3, 3, Luma([100]));
    assert!(box_convolve(&bright, 3).pixels().all(|p| p[0] == 255));
}

#[test]
fn test_nested_contours_are_not_reported() {
    // Hollow square with a dot inside: only the outer boundary is external
    let mut edges = GrayImage::new(40, 40);
    for i in 5..35 {
        for (x, y) in [(i, 5), (i, 34), (5, i), (34, i)] {
            edges.put_pixel(x, y, Luma([255]));
        }
    }
    edges.put_pixel(20, 20, Luma([255]));

    let contours = find_external_contours(&edges);

    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].bounding_rect(), Rect::new(5, 5, 29, 29));
}

#[test]
fn test_blank_edge_map_has_no_contours() {
    assert!(find_external_contours(&GrayImage::new(30, 30)).is_empty());
}

#[test]
fn test_grayscale_step_outputs_single_channel() -> anyhow::Result<()> {
    let pipeline = Pipeline::new().add_step(Arc::new(GrayscaleStep));
    let map = pipeline.run(&DynamicImage::ImageRgb8(image::RgbImage::new(8, 6)))?;
    assert_eq!(map.dimensions(), (8, 6));
    Ok(())
}

#[test]
fn test_pipeline_debug_saves_each_step() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let pipeline = build_edge_pipeline(&EdgeConfig::default()).with_debug(dir.path())?;

    pipeline.run(&create_test_scan())?;

    let mut names: Vec<String> = std::fs::read_dir(dir.path())?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    names.sort();
    assert_eq!(
        names,
        vec!["01_grayscale_conversion.png", "02_gaussian_blur.png", "03_edge_detection.png"]
    );
    Ok(())
}
