//! Per-file outcome records and the batch report.
//!
//! Every outcome path fills an [`EntryBuilder`] and finishes it exactly once;
//! the resulting [`ReportEntry`] is immutable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::error::{RipError, Result};
use crate::pipeline::BackgroundEstimate;
use crate::types::Colour;

/// File name of the JSON batch report.
pub const REPORT_FILENAME: &str = "_rip_report.json";

/// Final classification of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Background removed and outputs written.
    Processed,
    /// Nothing to remove.
    Skipped,
    /// Open, directory creation, or save failed.
    Failed,
    /// Dry run: would have been processed.
    WouldProcess,
    /// Dry run: would have been skipped.
    Skip,
    /// Dry run: could not be opened.
    Error,
}

/// Canvas size before and after cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropRecord {
    pub before: (u32, u32),
    pub after: (u32, u32),
}

/// The outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: Status,
    pub background: Option<Colour>,
    pub confidence: Option<f64>,
    pub pixels_removed: u64,
    pub flood_pixels: u64,
    pub fringe_pixels: u64,
    pub removal_pct: f64,
    pub crop: Option<CropRecord>,
    pub frames: Option<u32>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Incrementally collects a [`ReportEntry`].
#[derive(Debug)]
pub struct EntryBuilder {
    entry: ReportEntry,
}

impl EntryBuilder {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            entry: ReportEntry {
                input: input.into(),
                output: None,
                status: Status::Skipped,
                background: None,
                confidence: None,
                pixels_removed: 0,
                flood_pixels: 0,
                fringe_pixels: 0,
                removal_pct: 0.0,
                crop: None,
                frames: None,
                warnings: Vec::new(),
                errors: Vec::new(),
            },
        }
    }

    pub fn background(&mut self, estimate: &BackgroundEstimate) -> &mut Self {
        self.entry.background = Some(estimate.colour);
        self.entry.confidence = Some(estimate.confidence);
        self
    }

    /// Record removal counts against the original pixel total.
    pub fn removed(&mut self, flood: u64, fringe: u64, total_pixels: u64) -> &mut Self {
        let removed = flood + fringe;
        self.entry.flood_pixels = flood;
        self.entry.fringe_pixels = fringe;
        self.entry.pixels_removed = removed;
        self.entry.removal_pct = if total_pixels == 0 {
            0.0
        } else {
            removed as f64 * 100.0 / total_pixels as f64
        };
        self
    }

    pub fn crop(&mut self, before: (u32, u32), after: (u32, u32)) -> &mut Self {
        self.entry.crop = Some(CropRecord { before, after });
        self
    }

    pub fn frames(&mut self, count: u32) -> &mut Self {
        self.entry.frames = Some(count);
        self
    }

    pub fn output(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.entry.output = Some(path.into());
        self
    }

    pub fn warn(&mut self, message: impl Into<String>) -> &mut Self {
        self.entry.warnings.push(message.into());
        self
    }

    pub fn error(&mut self, message: impl Into<String>) -> &mut Self {
        self.entry.errors.push(message.into());
        self
    }

    /// Percentage removed so far.
    pub fn removal_pct(&self) -> f64 {
        self.entry.removal_pct
    }

    /// Seal the entry with its final status.
    pub fn finish(self, status: Status) -> ReportEntry {
        ReportEntry {
            status,
            ..self.entry
        }
    }
}

/// Aggregate counts for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub would_process: usize,
    pub total: usize,
    pub elapsed_secs: f64,
    /// The run was interrupted before every file was visited.
    pub interrupted: bool,
}

impl BatchSummary {
    /// Count one finished entry.
    pub fn record(&mut self, entry: &ReportEntry) {
        self.total += 1;
        match entry.status {
            Status::Processed => self.processed += 1,
            Status::Skipped | Status::Skip => self.skipped += 1,
            Status::Failed | Status::Error => self.failed += 1,
            Status::WouldProcess => self.would_process += 1,
        }
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
    }
}

/// Summary plus every entry, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub files: Vec<ReportEntry>,
}

/// Write a batch report as pretty-printed JSON.
pub fn write_report(report: &BatchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| RipError::Report {
        message: format!("Failed to serialize report: {}", e),
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RipError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create report directory: {}", e),
        })?;
    }
    fs::write(path, json).map_err(|e| RipError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write report: {}", e),
    })?;
    Ok(())
}
