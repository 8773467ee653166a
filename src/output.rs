//! Terminal output formatting for the ripper CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for machine-readable output.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::process::{BatchSummary, ReportEntry, Status};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Prints Cargo-style status lines to stderr with optional ANSI colours.
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
    verbose: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            verbose: false,
        }
    }

    /// Also print per-file details (background, crop, frames).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Print a status line with a green bold verb.
    /// e.g. "      Ripped enemies/bat.png"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Print a cyan line only in verbose mode.
    pub fn verbose(&self, verb: &str, message: &str) {
        if self.verbose {
            self.print_line(CYAN, verb, &self.dim(message));
        }
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Print the outcome of one file, followed by its warnings and errors.
    pub fn entry(&self, entry: &ReportEntry) {
        let message = describe_entry(entry);
        match entry.status {
            Status::Processed => self.status("Ripped", &message),
            Status::WouldProcess => self.info("Would rip", &message),
            Status::Skipped => self.warning("Skipped", &message),
            Status::Skip => self.warning("Would skip", &message),
            Status::Failed | Status::Error => self.error("Failed", &message),
        }

        if let Some(bg) = entry.background {
            let confidence = entry.confidence.unwrap_or(0.0) * 100.0;
            self.verbose("Background", &format!("{} ({:.0}%)", bg, confidence));
        }
        if let Some(crop) = entry.crop {
            self.verbose(
                "Cropped",
                &format!(
                    "{}x{} -> {}x{}",
                    crop.before.0, crop.before.1, crop.after.0, crop.after.1
                ),
            );
        }
        if let Some(frames) = entry.frames {
            self.verbose("Split", &plural(frames as usize, "frame", "frames"));
        }

        for warning in &entry.warnings {
            self.warning("Warning", warning);
        }
        for error in &entry.errors {
            self.error("Error", error);
        }
    }

    /// Print the closing summary line for a batch.
    pub fn summary(&self, summary: &BatchSummary) {
        if summary.interrupted {
            self.warning("Interrupted", "stopped before every file was visited");
        }
        let line = describe_summary(summary);
        if summary.failed > 0 {
            self.error("Finished", &line);
        } else {
            self.status("Finished", &line);
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// One-line description of a file outcome.
pub fn describe_entry(entry: &ReportEntry) -> String {
    let path = display_path(&entry.input);
    match entry.status {
        Status::Processed => format!(
            "{} ({:.1}% removed, {} px)",
            path, entry.removal_pct, entry.pixels_removed
        ),
        _ => path,
    }
}

/// Summary counts, e.g. "3 processed, 1 skipped, 0 failed in 0.42s".
pub fn describe_summary(summary: &BatchSummary) -> String {
    let mut parts = vec![
        format!("{} processed", summary.processed),
        format!("{} skipped", summary.skipped),
        format!("{} failed", summary.failed),
    ];
    if summary.would_process > 0 {
        parts.insert(0, format!("{} would process", summary.would_process));
    }
    format!("{} in {:.2}s", parts.join(", "), summary.elapsed_secs)
}

/// Pluralize a count: `plural(1, "file", "files")` → "1 file".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
