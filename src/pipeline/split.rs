//! Horizontal sprite-strip splitting.

use image::RgbaImage;
use thiserror::Error;

/// Frames narrower than this are rejected.
pub const MIN_FRAME_WIDTH: u32 = 4;

/// Why a strip could not be split. Always reported as a warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("cannot split into zero frames")]
    NoFrames,

    #[error("width {width} is not divisible by {frames} frames")]
    NotDivisible { width: u32, frames: u32 },

    #[error("frame width {frame_width}px is below the {MIN_FRAME_WIDTH}px minimum")]
    TooNarrow { frame_width: u32 },
}

/// Width of each frame, if `width` splits cleanly into `frames`.
pub fn frame_width(width: u32, frames: u32) -> Result<u32, SplitError> {
    if frames == 0 {
        return Err(SplitError::NoFrames);
    }
    if width % frames != 0 {
        return Err(SplitError::NotDivisible { width, frames });
    }
    let frame_width = width / frames;
    if frame_width < MIN_FRAME_WIDTH {
        return Err(SplitError::TooNarrow { frame_width });
    }
    Ok(frame_width)
}

/// Slice a strip into `frames` full-height, equal-width images, left to right.
pub fn split_frames(img: &RgbaImage, frames: u32) -> Result<Vec<RgbaImage>, SplitError> {
    let fw = frame_width(img.width(), frames)?;
    Ok((0..frames)
        .map(|i| image::imageops::crop_imm(img, i * fw, 0, fw, img.height()).to_image())
        .collect())
}

/// File name for frame `index` (0-based) of `stem`: `<stem>_frame_NN.png`.
pub fn frame_file_name(stem: &str, index: usize) -> String {
    format!("{}_frame_{:02}.png", stem, index + 1)
}
