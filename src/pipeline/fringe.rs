//! Anti-aliased fringe cleanup.
//!
//! Boundary pixels blended between sprite and background sit just outside
//! the flood tolerance. Each pass erodes the opaque boundary by one pixel,
//! clearing only boundary pixels still close to the background colour.

use image::RgbaImage;

use crate::types::Colour;

use super::flood::clear_pixels;
use super::MaskBackend;

/// Run up to `passes` boundary-erosion passes.
///
/// Stops early once a pass clears nothing. Returns the total pixels cleared.
pub fn clean_fringe(
    img: &mut RgbaImage,
    background: Colour,
    fringe_tolerance: u32,
    passes: u32,
    backend: &dyn MaskBackend,
) -> u64 {
    if passes == 0 || img.width() == 0 || img.height() == 0 {
        return 0;
    }

    // Pixel colours never change except by being cleared, and cleared
    // pixels are excluded as candidates, so one colour mask serves every pass.
    let near = backend.colour_mask(img, background, fringe_tolerance);
    let mut total = 0;

    for pass in 0..passes {
        let transparent = backend.transparent_mask(img);
        let candidates = backend.neighbour_mask(&transparent).and_not(&transparent);
        let cleared = clear_pixels(img, &candidates.and(&near));

        log::debug!("fringe pass {}: {} pixels cleared", pass + 1, cleared);
        if cleared == 0 {
            break;
        }
        total += cleared;
    }

    total
}
