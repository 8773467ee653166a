//! Pixel-level sprite cleanup stages.
//!
//! Each stage is a free function over an `RgbaImage`. Stages that need
//! per-pixel masks take a [`MaskBackend`] so the same algorithm can run on
//! either the scalar or the bulk implementation.

mod backend;
mod crop;
mod detect;
mod flood;
mod fringe;
mod mask;
mod preview;
mod scale;
mod split;

pub use backend::{Backend, BulkBackend, MaskBackend, ScalarBackend};
pub use crop::{content_bounds, crop_to_content, Rect};
pub use detect::{detect_background, BackgroundEstimate, LOW_CONFIDENCE};
pub use flood::{clear_pixels, connected_region, flood_fill, seed_points};
pub use fringe::clean_fringe;
pub use mask::Mask;
pub use preview::{checkerboard, preview_file_name, render_preview, TILE_SIZE};
pub use scale::{downscale, scaled_dimensions};
pub use split::{frame_file_name, frame_width, split_frames, SplitError, MIN_FRAME_WIDTH};
