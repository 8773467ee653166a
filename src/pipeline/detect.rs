//! Background colour detection.
//!
//! Samples the four corners and the image border, takes the most frequent
//! exact colour, and scores how much of the sample agrees with it.

use std::collections::HashMap;

use image::RgbaImage;
use serde::Serialize;

use crate::types::Colour;

/// Side length of the square patch sampled at each corner.
const CORNER_PATCH: u32 = 5;

/// Samples closer than this (strictly) count towards confidence.
const CONFIDENCE_DISTANCE: u32 = 30;

/// Confidence below this produces a warning.
pub const LOW_CONFIDENCE: f64 = 0.3;

/// The inferred background and how strongly the border agrees with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundEstimate {
    pub colour: Colour,
    /// Fraction of border samples near `colour`, in `[0, 1]`.
    pub confidence: f64,
}

impl BackgroundEstimate {
    /// An estimate supplied by the caller rather than detected.
    pub fn forced(colour: Colour) -> Self {
        Self {
            colour,
            confidence: 1.0,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence < LOW_CONFIDENCE
    }
}

/// Detect the background colour of an image.
///
/// Empty images yield white with zero confidence.
pub fn detect_background(img: &RgbaImage) -> BackgroundEstimate {
    let samples = border_samples(img);
    if samples.is_empty() {
        return BackgroundEstimate {
            colour: Colour::WHITE,
            confidence: 0.0,
        };
    }

    let colour = mode(&samples);
    let limit = CONFIDENCE_DISTANCE * CONFIDENCE_DISTANCE;
    let near = samples
        .iter()
        .filter(|s| s.distance_sq(colour) < limit)
        .count();

    BackgroundEstimate {
        colour,
        confidence: near as f64 / samples.len() as f64,
    }
}

/// Collect border samples in a fixed order: corner patches, then edges.
fn border_samples(img: &RgbaImage) -> Vec<Colour> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let at = |x: u32, y: u32| Colour::from_rgba(img.get_pixel(x, y).0);
    let half = (CORNER_PATCH / 2) as i64;
    let clamp = |v: i64, max: u32| v.clamp(0, max as i64 - 1) as u32;

    let mut samples = Vec::new();

    for (cx, cy) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        for dy in 0..CORNER_PATCH as i64 {
            for dx in 0..CORNER_PATCH as i64 {
                let sx = clamp(cx as i64 + dx - half, w);
                let sy = clamp(cy as i64 + dy - half, h);
                samples.push(at(sx, sy));
            }
        }
    }

    let step = (w.min(h) / 20).max(1) as usize;
    for x in (0..w).step_by(step) {
        samples.push(at(x, 0));
        samples.push(at(x, h - 1));
    }
    for y in (0..h).step_by(step) {
        samples.push(at(0, y));
        samples.push(at(w - 1, y));
    }

    samples
}

/// Most frequent colour; ties go to the colour seen first.
fn mode(samples: &[Colour]) -> Colour {
    let mut counts: HashMap<Colour, (usize, usize)> = HashMap::new();
    for (order, &c) in samples.iter().enumerate() {
        counts.entry(c).or_insert((0, order)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(c, _)| c)
        .unwrap_or(Colour::WHITE)
}
