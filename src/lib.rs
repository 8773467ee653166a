//! ripper - Background removal for generated sprites
//!
//! A library for turning flat-background sprite renders into clean,
//! transparent, tightly cropped game assets.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod types;

pub use discovery::{discover, Discovery, RipConfig};
pub use error::{Result, RipError};
pub use pipeline::{
    clean_fringe, crop_to_content, detect_background, downscale, flood_fill, render_preview,
    split_frames, Backend, BackgroundEstimate, MaskBackend, SplitError,
};
pub use process::{
    process, BatchController, BatchReport, BatchSummary, EntryBuilder, ReportEntry,
    SpriteProcessor, Status,
};
pub use types::{default_size_policy, Colour, ProcessingOptions, SizePolicy};
