//! Border-connected background removal.
//!
//! Only pixels reachable from the border through background-coloured
//! neighbours are cleared, so enclosed regions of the same colour survive.

use std::collections::VecDeque;

use image::RgbaImage;

use crate::types::Colour;

use super::{Mask, MaskBackend};

/// The eight flood entry points: corners and edge midpoints, deduplicated.
pub fn seed_points(width: u32, height: u32) -> Vec<(u32, u32)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (r, b) = (width - 1, height - 1);
    let (mx, my) = (width / 2, height / 2);

    let mut seeds = Vec::with_capacity(8);
    for seed in [
        (0, 0),
        (r, 0),
        (0, b),
        (r, b),
        (mx, 0),
        (mx, b),
        (0, my),
        (r, my),
    ] {
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    seeds
}

/// Breadth-first search over `matching` from every seed at once.
///
/// Returns the set of matching pixels 4-connected to a seed.
pub fn connected_region(matching: &Mask, seeds: &[(u32, u32)]) -> Mask {
    let (w, h) = (matching.width(), matching.height());
    let mut visited = Mask::new(w, h);
    let mut region = Mask::new(w, h);
    let mut queue = VecDeque::new();

    for &(x, y) in seeds {
        let idx = visited.index(x, y);
        if !visited.get(idx) {
            visited.set(idx);
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let idx = matching.index(x, y);
        if !matching.get(idx) {
            continue;
        }
        region.set(idx);

        let neighbours = [
            (x + 1 < w).then(|| (x + 1, y)),
            x.checked_sub(1).map(|nx| (nx, y)),
            (y + 1 < h).then(|| (x, y + 1)),
            y.checked_sub(1).map(|ny| (x, ny)),
        ];
        for (nx, ny) in neighbours.into_iter().flatten() {
            let nidx = visited.index(nx, ny);
            if !visited.get(nidx) {
                visited.set(nidx);
                queue.push_back((nx, ny));
            }
        }
    }

    region
}

/// Make every pixel in `mask` fully transparent. Returns how many were set.
pub fn clear_pixels(img: &mut RgbaImage, mask: &Mask) -> u64 {
    let raw: &mut [u8] = &mut **img;
    let mut cleared = 0;
    for idx in mask.ones() {
        raw[idx * 4..idx * 4 + 4].fill(0);
        cleared += 1;
    }
    cleared
}

/// Remove the border-connected region within `tolerance` of `background`.
///
/// Returns the number of pixels made transparent.
pub fn flood_fill(
    img: &mut RgbaImage,
    background: Colour,
    tolerance: u32,
    backend: &dyn MaskBackend,
) -> u64 {
    let seeds = seed_points(img.width(), img.height());
    if seeds.is_empty() {
        return 0;
    }

    let matching = backend.colour_mask(img, background, tolerance);
    let region = connected_region(&matching, &seeds);
    let cleared = clear_pixels(img, &region);

    log::debug!(
        "flood fill: {} of {} pixels matched, {} border-connected",
        matching.count(),
        matching.len(),
        cleared
    );
    cleared
}
