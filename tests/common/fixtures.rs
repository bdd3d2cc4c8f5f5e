#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as DrawRect;
use photosplit::Rect;

pub const SCAN_WIDTH: u32 = 400;
pub const SCAN_HEIGHT: u32 = 300;

/// Photos placed on the synthetic scan
pub const PHOTO_A: Rect = Rect::new(40, 30, 120, 90);
pub const PHOTO_B: Rect = Rect::new(210, 120, 150, 140);

/// Dust speck well below the default minimum size
pub const SPECK: Rect = Rect::new(300, 30, 4, 4);

const PAPER: Rgb<u8> = Rgb([250, 250, 250]);

fn fill(img: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    let r = DrawRect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height);
    draw_filled_rect_mut(img, r, color);
}

/// Dark photo with a lighter inner block, so the photo has edges of its own
fn draw_photo(img: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    fill(img, rect, color);
    let inner = Rect::new(rect.x + 20, rect.y + 20, rect.width - 40, rect.height - 40);
    fill(img, inner, Rgb([160, 140, 120]));
}

/// White flatbed scan holding two photos and a speck of dust
pub fn create_test_scan() -> DynamicImage {
    let mut img = RgbImage::from_pixel(SCAN_WIDTH, SCAN_HEIGHT, PAPER);
    draw_photo(&mut img, PHOTO_A, Rgb([40, 60, 90]));
    draw_photo(&mut img, PHOTO_B, Rgb([70, 30, 30]));
    fill(&mut img, SPECK, Rgb([20, 20, 20]));
    DynamicImage::ImageRgb8(img)
}

/// Blank scan with nothing on it
pub fn create_blank_scan() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(SCAN_WIDTH, SCAN_HEIGHT, PAPER))
}

/// Image where every pixel encodes its own coordinates
pub fn create_coordinate_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
}

/// True when `found` covers `expected` with at most `slack` pixels to spare per side
pub fn covers_with_slack(found: &Rect, expected: &Rect, slack: u32) -> bool {
    let found_right = found.x + found.width;
    let found_bottom = found.y + found.height;
    let expected_right = expected.x + expected.width;
    let expected_bottom = expected.y + expected.height;

    found.x <= expected.x
        && found.y <= expected.y
        && found_right >= expected_right
        && found_bottom >= expected_bottom
        && expected.x - found.x <= slack
        && expected.y - found.y <= slack
        && found_right - expected_right <= slack
        && found_bottom - expected_bottom <= slack
}
