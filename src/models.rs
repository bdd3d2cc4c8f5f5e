use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in image pixel coordinates, origin at the top-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top_left(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// `(x + width, y + height)`. Paired with the inclusive test in
    /// [`Rect::contains_point`], so a rectangle contains its own corners.
    pub fn bottom_right(&self) -> Point {
        Point {
            x: self.x.saturating_add(self.width),
            y: self.y.saturating_add(self.height),
        }
    }

    /// Pixel columns and rows covered, counting both corners.
    /// A zero-area rectangle still covers its single corner pixel.
    pub fn pixel_extent(&self) -> (u32, u32) {
        (self.width.saturating_add(1), self.height.saturating_add(1))
    }

    pub fn contains_point(&self, p: Point) -> bool {
        let br = self.bottom_right();
        p.x >= self.x && p.x <= br.x && p.y >= self.y && p.y <= br.y
    }

    /// True if both corners of `self` lie within `outer`.
    /// Reflexive: every rectangle is inside itself.
    pub fn is_inside(&self, outer: &Rect) -> bool {
        outer.contains_point(self.top_left()) && outer.contains_point(self.bottom_right())
    }

    pub fn meets_min_size(&self, min_width: u32, min_height: u32) -> bool {
        self.width >= min_width && self.height >= min_height
    }

    /// Whether every pixel of [`Rect::pixel_extent`] lies in an image of the given size
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        (self.x as u64 + self.width as u64) < width as u64
            && (self.y as u64 + self.height as u64) < height as u64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Closed boundary traced in the edge map
#[derive(Debug, Clone, Default)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Minimal rectangle whose corners enclose every point.
    /// A single point (or an empty contour) gives a zero-area rectangle.
    pub fn bounding_rect(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// One photo cropped out of the scan
#[derive(Debug, Clone)]
pub struct Region {
    /// 1-based position in the valid set
    pub index: usize,
    pub rect: Rect,
    /// Owned copy of the pixels, independent of the source buffer
    pub image: DynamicImage,
}
