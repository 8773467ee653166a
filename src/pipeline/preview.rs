//! Checkerboard previews for eyeballing transparency.

use image::{imageops, Rgba, RgbaImage};

/// Checkerboard tile size in pixels.
pub const TILE_SIZE: u32 = 8;

const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DARK: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// A checkerboard of the given size. The top-left tile is dark.
pub fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / TILE_SIZE + y / TILE_SIZE) % 2 == 0 {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Alpha-composite `img` over a checkerboard of the same size.
pub fn render_preview(img: &RgbaImage) -> RgbaImage {
    let mut board = checkerboard(img.width(), img.height());
    imageops::overlay(&mut board, img, 0, 0);
    // The blend rounds alpha down to 254 for partial coverage; the board is opaque.
    for px in board.pixels_mut() {
        px.0[3] = 255;
    }
    board
}

/// File name of the preview for `stem`.
pub fn preview_file_name(stem: &str) -> String {
    format!("{}_preview.png", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_tiles() {
        let board = checkerboard(16, 16);
        assert_eq!(*board.get_pixel(0, 0), DARK);
        assert_eq!(*board.get_pixel(7, 7), DARK);
        assert_eq!(*board.get_pixel(8, 0), LIGHT);
        assert_eq!(*board.get_pixel(0, 8), LIGHT);
        assert_eq!(*board.get_pixel(8, 8), DARK);
    }

    #[test]
    fn test_preview_composites() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

        let preview = render_preview(&img);
        assert_eq!(preview.dimensions(), (16, 16));
        assert_eq!(preview.get_pixel(1, 1).0, [255, 0, 0, 255]);
        // Transparent pixels show the board.
        assert_eq!(*preview.get_pixel(0, 0), DARK);
        assert_eq!(*preview.get_pixel(9, 0), LIGHT);
    }

    #[test]
    fn test_preview_is_opaque() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([10, 200, 30, 128]));
        let preview = render_preview(&img);
        assert!(preview.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_preview_half_alpha_blends_opaque() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([10, 200, 30, 128]));
        let preview = render_preview(&img);
        for px in preview.pixels() {
            assert_eq!(px.0[3], 255);
            // Green dominates the blend, but the board still shows through.
            assert!(px.0[1] >= 200);
            assert!(px.0[0] > 10 && px.0[0] < 200);
        }
    }

    #[test]
    fn test_preview_file_name() {
        assert_eq!(preview_file_name("bat"), "bat_preview.png");
    }
}
