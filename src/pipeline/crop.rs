//! Crop to the bounding box of visible content.

use image::RgbaImage;
use serde::Serialize;

/// Images narrower or shorter than this are never cropped.
const MIN_CROP_DIMENSION: u32 = 16;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Smallest rectangle containing every pixel with non-zero alpha.
pub fn content_bounds(img: &RgbaImage) -> Option<Rect> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    bounds.map(|(x0, y0, x1, y1)| Rect {
        x: x0,
        y: y0,
        w: x1 - x0 + 1,
        h: y1 - y0 + 1,
    })
}

/// Crop to content plus `padding` on every side, clamped to the image.
///
/// Returns the input untouched when it is too small to crop, fully
/// transparent, or when the padded box already covers the whole image.
pub fn crop_to_content(img: RgbaImage, padding: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w < MIN_CROP_DIMENSION || h < MIN_CROP_DIMENSION {
        return img;
    }
    let Some(content) = content_bounds(&img) else {
        return img;
    };

    let x0 = content.x.saturating_sub(padding);
    let y0 = content.y.saturating_sub(padding);
    let x1 = (content.x + content.w).saturating_add(padding).min(w);
    let y1 = (content.y + content.h).saturating_add(padding).min(h);

    if (x0, y0, x1, y1) == (0, 0, w, h) {
        return img;
    }

    image::imageops::crop_imm(&img, x0, y0, x1 - x0, y1 - y0).to_image()
}
