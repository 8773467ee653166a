//! Rip command implementation.
//!
//! Resolves the target into a file list, layers command-line flags over
//! the project config, and runs the batch.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Args;

use crate::discovery::{discover, Discovery};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::Backend;
use crate::process::{BatchController, BatchReport};
use crate::types::{Colour, ProcessingOptions};

/// Remove backgrounds from a sprite or a directory of sprites
#[derive(Args, Debug)]
pub struct RipArgs {
    /// Image file or directory to process
    pub path: PathBuf,

    /// Colour tolerance for background flood fill
    #[arg(long, short)]
    pub tolerance: Option<u32>,

    /// Colour tolerance for edge fringe cleanup
    #[arg(long)]
    pub fringe_tolerance: Option<u32>,

    /// Number of fringe cleanup passes
    #[arg(long)]
    pub fringe_passes: Option<u32>,

    /// Downscale so the longest edge is at most this many pixels
    #[arg(long, short)]
    pub scale: Option<u32>,

    /// Padding kept around content when cropping
    #[arg(long)]
    pub padding: Option<u32>,

    /// Keep the full canvas
    #[arg(long)]
    pub no_crop: bool,

    /// Skip writing checkerboard previews
    #[arg(long)]
    pub no_preview: bool,

    /// Split the result into this many equal-width frames
    #[arg(long)]
    pub split_frames: Option<u32>,

    /// Write outputs here instead of overwriting the inputs
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Copy originals to _originals/ before overwriting
    #[arg(long)]
    pub backup: bool,

    /// Report what would happen without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Only process <path>/batch_N/
    #[arg(long, value_name = "N")]
    pub batch: Option<u32>,

    /// Write _rip_report.json
    #[arg(long)]
    pub report: bool,

    /// Number of files processed in parallel
    #[arg(long, short)]
    pub jobs: Option<usize>,

    /// Mask implementation
    #[arg(long, value_enum, default_value_t = Backend::Bulk)]
    pub backend: Backend,

    /// Use this background colour instead of detecting one (e.g. '#FFFFFF')
    #[arg(long = "bg", value_name = "COLOUR")]
    pub background: Option<Colour>,

    /// Config file to use instead of <path>/rip.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show per-file details
    #[arg(long, short)]
    pub verbose: bool,
}

impl RipArgs {
    /// Options for this run: defaults, then config, then flags.
    pub fn options(&self, found: &Discovery) -> ProcessingOptions {
        let mut opts = found.config.base_options();

        if let Some(t) = self.tolerance {
            opts.tolerance = t;
        }
        if let Some(t) = self.fringe_tolerance {
            opts.fringe_tolerance = t;
        }
        if let Some(p) = self.fringe_passes {
            opts.fringe_passes = p;
        }
        if let Some(p) = self.padding {
            opts.padding = p;
        }
        if self.no_crop {
            opts.crop = false;
        }
        if self.no_preview {
            opts.preview = false;
        }

        opts.target_size = self.scale;
        opts.split_frames = self.split_frames;
        opts.output_dir = self.output_dir.clone();
        opts.root = Some(found.root.clone());
        opts.backup = self.backup;
        opts.dry_run = self.dry_run;
        opts.report = self.report;
        opts.background = self.background;
        opts.backend = self.backend;
        opts
    }
}

/// Exit status used when a second interrupt aborts the run.
pub const ABORT_EXIT_CODE: i32 = 130;

/// Record an interrupt. Returns `true` if one was already pending, meaning
/// the user asked twice and the process should stop immediately.
pub fn note_interrupt(flag: &AtomicBool) -> bool {
    flag.swap(true, Ordering::SeqCst)
}

pub fn run(args: RipArgs, printer: &Printer, interrupt: Arc<AtomicBool>) -> Result<BatchReport> {
    let found = discover(&args.path, args.batch, args.config.as_deref())?;
    let options = args.options(&found);
    let policy = found.config.size_policy();

    if found.has_config {
        printer.verbose("Config", &display_path(&found.root));
    }
    if found.files.is_empty() {
        printer.warning("Warning", &format!("no images found in {}", display_path(&args.path)));
    } else {
        printer.info(
            "Found",
            &format!(
                "{} in {}",
                plural(found.files.len(), "image", "images"),
                display_path(&found.root)
            ),
        );
    }

    let mut controller = BatchController::new(&options, &policy).with_interrupt(interrupt);
    if let Some(jobs) = args.jobs {
        controller = controller.with_jobs(jobs);
    }

    let report = controller.run(&found.files, |entry| printer.entry(entry))?;

    printer.summary(&report.summary);
    if options.report {
        printer.info("Report", &display_path(&controller.report_path()));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Status, REPORT_FILENAME};
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RipArgs,
    }

    fn parse(argv: &[&str]) -> RipArgs {
        TestCli::parse_from(std::iter::once("ripper").chain(argv.iter().copied())).args
    }

    fn sprite() -> RgbaImage {
        RgbaImage::from_fn(32, 32, |x, y| {
            if (4..28).contains(&x) && (4..28).contains(&y) {
                Rgba([30, 60, 200, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    fn no_interrupt() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn test_second_interrupt_aborts() {
        let flag = AtomicBool::new(false);
        assert!(!note_interrupt(&flag));
        assert!(flag.load(Ordering::SeqCst));
        assert!(note_interrupt(&flag));
        assert!(note_interrupt(&flag));
    }

    #[test]
    fn test_parse_flags() {
        let args = parse(&[
            "gen",
            "-t",
            "25",
            "--scale",
            "64",
            "--no-preview",
            "--bg",
            "#00FF00",
            "--backend",
            "scalar",
            "--jobs",
            "2",
        ]);
        assert_eq!(args.path, PathBuf::from("gen"));
        assert_eq!(args.tolerance, Some(25));
        assert_eq!(args.scale, Some(64));
        assert!(args.no_preview);
        assert_eq!(args.background, Some(Colour::rgb(0, 255, 0)));
        assert_eq!(args.backend, Backend::Scalar);
        assert_eq!(args.jobs, Some(2));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("rip.yaml"), "tolerance: 10\npadding: 5\n").unwrap();
        let path = dir.path().to_string_lossy().to_string();

        let args = parse(&[path.as_str(), "--tolerance", "33"]);
        let found = discover(&args.path, None, None).unwrap();
        let opts = args.options(&found);

        assert_eq!(opts.tolerance, 33);
        assert_eq!(opts.padding, 5);
        assert_eq!(opts.root, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_run_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("gen")).unwrap();
        sprite().save(dir.path().join("gen/a.png")).unwrap();
        let path = dir.path().join("gen").to_string_lossy().to_string();

        let args = parse(&[path.as_str(), "--report", "--jobs", "1"]);
        let report = run(args, &Printer::new(), no_interrupt()).unwrap();

        assert_eq!(report.summary.processed, 1);
        assert!(dir.path().join("gen").join(REPORT_FILENAME).exists());
        assert!(dir.path().join("gen/a_preview.png").exists());
    }

    #[test]
    fn test_run_dry_run_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.png");
        sprite().save(&file).unwrap();
        let before = fs::read(&file).unwrap();

        let path = file.to_string_lossy().to_string();
        let args = parse(&[path.as_str(), "--dry-run"]);
        let report = run(args, &Printer::new(), no_interrupt()).unwrap();

        assert_eq!(report.files[0].status, Status::WouldProcess);
        assert_eq!(fs::read(&file).unwrap(), before);
    }

    #[test]
    fn test_run_missing_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").to_string_lossy().to_string();
        let args = parse(&[path.as_str()]);
        assert!(run(args, &Printer::new(), no_interrupt()).is_err());
    }
}
