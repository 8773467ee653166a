//! Nearest-neighbour longest-edge downscaling.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Output dimensions for fitting the longest edge to `target`.
///
/// Returns `None` when the image already fits; never upscales.
pub fn scaled_dimensions(width: u32, height: u32, target: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= target {
        return None;
    }

    let factor = target as f64 / longest as f64;
    let w = ((width as f64 * factor) as u32).max(1);
    let h = ((height as f64 * factor) as u32).max(1);
    Some((w, h))
}

/// Downscale so the longest edge is at most `target`, keeping hard pixel edges.
pub fn downscale(img: RgbaImage, target: u32) -> RgbaImage {
    match scaled_dimensions(img.width(), img.height(), target) {
        Some((w, h)) => imageops::resize(&img, w, h, FilterType::Nearest),
        None => img,
    }
}
