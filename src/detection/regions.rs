//! Rectangle reduction and filtering.
//!
//! Contours become bounding rectangles, nested duplicates are dropped and
//! whatever is left below the minimum footprint is discarded. The walk order
//! decides which of two identical rectangles survives, so callers must keep
//! candidates in discovery order.

use std::collections::VecDeque;

use crate::models::{Contour, Rect};

/// One bounding rectangle per contour, in the same order
pub fn bounding_rects(contours: &[Contour]) -> Vec<Rect> {
    contours.iter().map(Contour::bounding_rect).collect()
}

/// Containment pass followed by the minimum size pass
pub fn filter_regions(candidates: &[Rect], min_width: u32, min_height: u32) -> Vec<Rect> {
    let mut valid = remove_nested(candidates);
    remove_small(&mut valid, min_width, min_height);
    valid
}

/// Drop every rectangle that lies inside another one.
///
/// Rectangles are taken from the front of the unchecked queue. One is
/// rejected when any rectangle still waiting in the queue contains it, even
/// if that container is rejected later, or when an already accepted
/// rectangle contains it. Survivors keep their acceptance order.
pub fn remove_nested(candidates: &[Rect]) -> Vec<Rect> {
    let mut unchecked: VecDeque<Rect> = candidates.iter().copied().collect();
    let mut valid: Vec<Rect> = Vec::with_capacity(unchecked.len());

    while let Some(area) = unchecked.pop_front() {
        if unchecked.iter().any(|other| area.is_inside(other)) {
            continue;
        }
        if valid.iter().any(|other| area.is_inside(other)) {
            continue;
        }
        valid.push(area);
    }

    valid
}

/// Keep only rectangles at least `min_width` wide and `min_height` tall
pub fn remove_small(rects: &mut Vec<Rect>, min_width: u32, min_height: u32) {
    rects.retain(|r| r.meets_min_size(min_width, min_height));
}

