//! Mask-building strategies.
//!
//! Flood fill and fringe cleanup share a single algorithm; the backends only
//! differ in how they derive the per-pixel masks the algorithm consumes.
//! Every backend must produce bit-identical masks.

use image::RgbaImage;
use rayon::prelude::*;

use crate::types::{distance_sq, tolerance_sq, Colour};

use super::Mask;

/// Bytes covered by one mask word (64 RGBA pixels).
const WORD_BYTES: usize = 64 * 4;

/// Computes the masks the pixel stages run on.
pub trait MaskBackend: Send + Sync {
    /// Pixels whose RGB lies within `tolerance` of `target`.
    fn colour_mask(&self, img: &RgbaImage, target: Colour, tolerance: u32) -> Mask;

    /// Pixels with alpha 0.
    fn transparent_mask(&self, img: &RgbaImage) -> Mask;

    /// Pixels with at least one 4-connected neighbour set in `mask`.
    fn neighbour_mask(&self, mask: &Mask) -> Mask;
}

/// Backend selector carried in the processing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Plain nested loops over pixels.
    Scalar,
    /// Word-packed bit operations, with colour matching spread over rayon.
    #[default]
    Bulk,
}

impl Backend {
    /// The strategy implementing this backend.
    pub fn strategy(self) -> &'static dyn MaskBackend {
        match self {
            Backend::Scalar => &ScalarBackend,
            Backend::Bulk => &BulkBackend,
        }
    }
}

/// Pixel-at-a-time reference implementation.
pub struct ScalarBackend;

impl MaskBackend for ScalarBackend {
    fn colour_mask(&self, img: &RgbaImage, target: Colour, tolerance: u32) -> Mask {
        let mut mask = Mask::new(img.width(), img.height());
        for y in 0..img.height() {
            for x in 0..img.width() {
                let px = img.get_pixel(x, y).0;
                if Colour::from_rgba(px).within(target, tolerance) {
                    let idx = mask.index(x, y);
                    mask.set(idx);
                }
            }
        }
        mask
    }

    fn transparent_mask(&self, img: &RgbaImage) -> Mask {
        let mut mask = Mask::new(img.width(), img.height());
        for y in 0..img.height() {
            for x in 0..img.width() {
                if img.get_pixel(x, y).0[3] == 0 {
                    let idx = mask.index(x, y);
                    mask.set(idx);
                }
            }
        }
        mask
    }

    fn neighbour_mask(&self, mask: &Mask) -> Mask {
        let (w, h) = (mask.width(), mask.height());
        let mut out = Mask::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let hit = (x > 0 && mask.get(mask.index(x - 1, y)))
                    || (x + 1 < w && mask.get(mask.index(x + 1, y)))
                    || (y > 0 && mask.get(mask.index(x, y - 1)))
                    || (y + 1 < h && mask.get(mask.index(x, y + 1)));
                if hit {
                    let idx = out.index(x, y);
                    out.set(idx);
                }
            }
        }
        out
    }
}

/// Batch implementation over packed words.
pub struct BulkBackend;

impl BulkBackend {
    fn pack(img: &RgbaImage, test: impl Fn(&[u8]) -> bool + Sync) -> Mask {
        let words = img
            .as_raw()
            .par_chunks(WORD_BYTES)
            .map(|chunk| {
                chunk
                    .chunks_exact(4)
                    .enumerate()
                    .fold(0u64, |word, (bit, px)| {
                        if test(px) {
                            word | 1 << bit
                        } else {
                            word
                        }
                    })
            })
            .collect();
        Mask::from_words(img.width(), img.height(), words)
    }
}

impl MaskBackend for BulkBackend {
    fn colour_mask(&self, img: &RgbaImage, target: Colour, tolerance: u32) -> Mask {
        let limit = tolerance_sq(tolerance);
        Self::pack(img, |px| distance_sq(px[0], px[1], px[2], target) <= limit)
    }

    fn transparent_mask(&self, img: &RgbaImage) -> Mask {
        Self::pack(img, |px| px[3] == 0)
    }

    fn neighbour_mask(&self, mask: &Mask) -> Mask {
        let (w, h) = (mask.width(), mask.height());
        if mask.is_empty() {
            return Mask::new(w, h);
        }
        let row = w as usize;
        let first_col = Mask::column(w, h, 0);
        let last_col = Mask::column(w, h, w - 1);

        // Left neighbour of x is x - 1: invalid in the first column.
        let from_left = mask.shifted_forward(1).and_not(&first_col);
        // Right neighbour of x is x + 1: invalid in the last column.
        let from_right = mask.shifted_back(1).and_not(&last_col);
        let from_above = mask.shifted_forward(row);
        let from_below = mask.shifted_back(row);

        from_left.or(&from_right).or(&from_above).or(&from_below)
    }
}
