//! Debug renderings of contours and rectangles.
//!
//! Colours are drawn from an RNG owned by the renderer and seeded explicitly,
//! so two runs over the same scan produce identical pictures.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as DrawRect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::models::{Contour, Rect};
use crate::pipeline::{DebugConfig, save_debug_image};

pub const DEBUG_COLOR_SEED: u64 = 12345;

pub struct DebugRenderer {
    config: DebugConfig,
    rng: StdRng,
}

impl DebugRenderer {
    pub fn new(config: DebugConfig) -> Self {
        Self::with_seed(config, DEBUG_COLOR_SEED)
    }

    pub fn with_seed(config: DebugConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn next_color(&mut self) -> Rgb<u8> {
        Rgb([
            self.rng.random_range(0..=255),
            self.rng.random_range(0..=255),
            self.rng.random_range(0..=255),
        ])
    }

    /// Draw each contour as a closed polyline on a black canvas
    pub fn save_contours(&mut self, file_name: &str, size: (u32, u32), contours: &[Contour]) -> Result<()> {
        let mut canvas = RgbImage::new(size.0, size.1);

        for contour in contours {
            let color = self.next_color();
            let points = &contour.points;
            if points.len() == 1 {
                let p = points[0];
                if p.x < size.0 && p.y < size.1 {
                    canvas.put_pixel(p.x, p.y, color);
                }
                continue;
            }
            for (i, start) in points.iter().enumerate() {
                let end = points[(i + 1) % points.len()];
                draw_line_segment_mut(
                    &mut canvas,
                    (start.x as f32, start.y as f32),
                    (end.x as f32, end.y as f32),
                    color,
                );
            }
        }

        self.save(file_name, canvas)
    }

    /// Draw rectangle outlines `thickness` pixels wide on a black canvas
    pub fn save_rects(&mut self, file_name: &str, size: (u32, u32), rects: &[Rect], thickness: u32) -> Result<()> {
        let mut canvas = RgbImage::new(size.0, size.1);

        for rect in rects {
            let color = self.next_color();
            // Nothing to draw for rectangles starting off the canvas
            if rect.x >= size.0 || rect.y >= size.1 {
                continue;
            }
            let (Ok(left), Ok(top)) = (i32::try_from(rect.x), i32::try_from(rect.y)) else {
                continue;
            };
            // Clip to the canvas so imageproc's edge arithmetic stays in range
            let (extent_w, extent_h) = rect.pixel_extent();
            let extent_w = extent_w.min(size.0 - rect.x);
            let extent_h = extent_h.min(size.1 - rect.y);
            for inset in 0..thickness {
                let width = extent_w.saturating_sub(2 * inset);
                let height = extent_h.saturating_sub(2 * inset);
                // imageproc rects must be at least 1x1
                if width == 0 || height == 0 {
                    break;
                }
                let offset = i32::try_from(inset).unwrap_or(i32::MAX);
                let outline = DrawRect::at(left + offset, top + offset).of_size(width, height);
                draw_hollow_rect_mut(&mut canvas, outline, color);
            }
        }

        self.save(file_name, canvas)
    }

    fn save(&self, file_name: &str, canvas: RgbImage) -> Result<()> {
        save_debug_image(&DynamicImage::ImageRgb8(canvas), &self.config.path(file_name))?;
        debug!("Debug: saved {}", file_name);
        Ok(())
    }
}
