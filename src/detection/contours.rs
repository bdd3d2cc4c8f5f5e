use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use crate::models::{Contour, Point};

/// Trace the outermost boundaries of the non-zero pixels in an edge map.
/// Holes and everything nested inside them are dropped.
pub fn find_external_contours(edges: &GrayImage) -> Vec<Contour> {
    find_contours::<u32>(edges)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            Contour::new(c.points.iter().map(|p| Point::new(p.x, p.y)).collect())
        })
        .collect()
}
