use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::edges::canny;
use imageproc::filter::{gaussian_blur_f32, laplacian_filter, separable_filter_equal};

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Apply Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Detect edges using Canny edge detector
pub fn detect_edges_canny(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Absolute Laplacian response, saturated to `u8`
pub fn detect_edges_laplacian(img: &GrayImage) -> GrayImage {
    let response = laplacian_filter(img);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let v = response.get_pixel(x, y)[0].unsigned_abs();
        Luma([v.min(u8::MAX as u16) as u8])
    })
}

/// Pixels above `level` become 255, everything else 0
pub fn threshold_binary(img: &GrayImage, level: u8) -> GrayImage {
    threshold(img, level, ThresholdType::Binary)
}

/// Convolve with a `size`x`size` all-ones kernel, saturating at 255.
/// Pixels past the border are replicated from the nearest edge.
pub fn box_convolve(img: &GrayImage, size: u32) -> GrayImage {
    if size <= 1 {
        return img.clone();
    }
    let kernel = vec![1.0f32; size as usize];
    separable_filter_equal(img, &kernel)
}
