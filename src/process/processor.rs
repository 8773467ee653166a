//! Single-file sprite processing.
//!
//! Runs detection, flood fill, fringe cleanup, crop, scale and split on one
//! image, writes the outputs, and classifies the result. Nothing in here
//! returns an error: every failure is folded into the [`ReportEntry`].

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::error::{RipError, Result};
use crate::pipeline::{
    clean_fringe, crop_to_content, detect_background, downscale, flood_fill, frame_file_name,
    preview_file_name, render_preview, split_frames, BackgroundEstimate,
};
use crate::types::ProcessingOptions;

use super::report::{EntryBuilder, ReportEntry, Status};

/// Inputs with more than this fraction of alpha-0 pixels are left alone.
const ALREADY_TRANSPARENT_FRACTION: f64 = 0.3;

/// Processed files removing at most this percentage get a warning.
const LOW_REMOVAL_PCT: f64 = 20.0;

/// Rows inspected when deciding why nothing was removed.
const TRANSPARENCY_PROBE_ROWS: u32 = 3;

/// Directory, beside the source, that originals are copied into.
pub const BACKUP_DIR: &str = "_originals";

/// Process one image with `options` and report what happened.
pub fn process(path: &Path, options: &ProcessingOptions) -> ReportEntry {
    SpriteProcessor::new(options).process(path)
}

/// Applies one set of options to individual files.
pub struct SpriteProcessor<'a> {
    options: &'a ProcessingOptions,
}

impl<'a> SpriteProcessor<'a> {
    pub fn new(options: &'a ProcessingOptions) -> Self {
        Self { options }
    }

    pub fn process(&self, input: &Path) -> ReportEntry {
        let opts = self.options;
        let mut entry = EntryBuilder::new(input);

        let mut img = match open_image(input) {
            Ok(img) => img,
            Err(e) => {
                log::error!("{}", e);
                entry.error(e.to_string());
                return entry.finish(if opts.dry_run {
                    Status::Error
                } else {
                    Status::Failed
                });
            }
        };

        let backend = opts.backend.strategy();
        let (width, height) = img.dimensions();
        let total = width as u64 * height as u64;

        let transparent = backend.transparent_mask(&img).count();
        if total > 0 && transparent as f64 / total as f64 > ALREADY_TRANSPARENT_FRACTION {
            entry.warn("already has transparency");
            return entry.finish(if opts.dry_run {
                Status::Skip
            } else {
                Status::Skipped
            });
        }

        let estimate = match opts.background {
            Some(colour) => BackgroundEstimate::forced(colour),
            None => detect_background(&img),
        };
        entry.background(&estimate);
        log::debug!(
            "{}: background {} ({:.0}% confidence)",
            input.display(),
            estimate.colour,
            estimate.confidence * 100.0
        );
        if estimate.is_low_confidence() {
            entry.warn(format!(
                "low confidence background detection ({:.0}%): may be a complex scene",
                estimate.confidence * 100.0
            ));
        }

        if opts.dry_run {
            entry.output(opts.output_path(input));
            return entry.finish(Status::WouldProcess);
        }

        let flood = flood_fill(&mut img, estimate.colour, opts.tolerance, backend);
        let fringe = clean_fringe(
            &mut img,
            estimate.colour,
            opts.fringe_tolerance,
            opts.fringe_passes,
            backend,
        );
        entry.removed(flood, fringe, total);

        if flood + fringe == 0 {
            entry.warn(zero_removal_reason(&img));
            return entry.finish(Status::Skipped);
        }

        if opts.crop {
            let before = img.dimensions();
            img = crop_to_content(img, opts.padding);
            entry.crop(before, img.dimensions());
        }

        if let Some(target) = opts.target_size {
            img = downscale(img, target);
        }

        let frames = match opts.split_frames {
            Some(count) => match split_frames(&img, count) {
                Ok(frames) => frames,
                Err(e) => {
                    log::warn!("{}: split skipped: {}", input.display(), e);
                    entry.warn(format!("split skipped: {}", e));
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let output = opts.output_path(input);
        entry.output(&output);

        if let Err(e) = self.write_outputs(input, &output, &img, &frames, &mut entry) {
            log::error!("{}", e);
            entry.error(e.to_string());
            return entry.finish(Status::Failed);
        }

        if entry.removal_pct() <= LOW_REMOVAL_PCT {
            entry.warn("low removal, check manually");
        }
        entry.finish(Status::Processed)
    }

    /// Save the image and its side outputs.
    ///
    /// Directory and save errors are returned; backup and preview problems
    /// only add warnings.
    fn write_outputs(
        &self,
        input: &Path,
        output: &Path,
        img: &RgbaImage,
        frames: &[RgbaImage],
        entry: &mut EntryBuilder,
    ) -> Result<()> {
        let opts = self.options;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RipError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        if opts.backup && output == input {
            if let Err(e) = backup_original(input) {
                log::warn!("{}", e);
                entry.warn(format!("backup failed: {}", e));
            }
        }

        save_png(img, output)?;

        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sprite");

        if !frames.is_empty() {
            for (i, frame) in frames.iter().enumerate() {
                save_png(frame, &output.with_file_name(frame_file_name(stem, i)))?;
            }
            entry.frames(frames.len() as u32);
        }

        if opts.preview {
            let preview_path = output.with_file_name(preview_file_name(stem));
            if let Err(e) = save_png(&render_preview(img), &preview_path) {
                log::warn!("{}", e);
                entry.warn(format!("preview not written: {}", e));
            }
        }

        Ok(())
    }
}

/// Open any supported image as 8-bit RGBA.
pub fn open_image(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| RipError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to load image: {}", e),
        })
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| RipError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

/// Where [`backup_original`] copies `source`.
pub fn backup_path(source: &Path) -> PathBuf {
    let dir = source
        .parent()
        .map(|p| p.join(BACKUP_DIR))
        .unwrap_or_else(|| PathBuf::from(BACKUP_DIR));
    match source.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}

/// Copy the untouched source bytes to `_originals/` beside it.
fn backup_original(source: &Path) -> Result<PathBuf> {
    let dest = backup_path(source);
    if let Some(dir) = dest.parent() {
        fs::create_dir_all(dir).map_err(|e| RipError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create backup directory: {}", e),
        })?;
    }
    fs::copy(source, &dest).map_err(|e| RipError::Io {
        path: dest.clone(),
        message: format!("Failed to back up original: {}", e),
    })?;
    Ok(dest)
}

/// Explain a run that removed nothing.
fn zero_removal_reason(img: &RgbaImage) -> &'static str {
    let rows = img.height().min(TRANSPARENCY_PROBE_ROWS);
    let has_alpha = (0..rows).any(|y| (0..img.width()).any(|x| img.get_pixel(x, y).0[3] < 255));
    if has_alpha {
        "already has transparency"
    } else {
        "no background removed, manual check needed"
    }
}
