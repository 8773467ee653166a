//! File system scanner for sprite images.
//!
//! Recursively finds PNG files under a root, skipping the artifacts a
//! previous run wrote (previews, frames, backups).

use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::process::BACKUP_DIR;

use super::config::RipConfig;

/// Scan a directory for PNG files eligible for processing.
///
/// Exclude patterns are matched against the path relative to `root`.
/// Results are sorted so batch order is stable across runs.
pub fn scan_directory(root: &Path, config: &RipConfig) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != BACKUP_DIR)
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_png(path) && !is_generated(path))
        .filter(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path);
            !config.is_excluded(relative)
        })
        .collect();

    files.sort();
    files
}

/// Whether the path has a `.png` extension, in any case.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Whether the file is an output of an earlier run rather than a source.
pub fn is_generated(path: &Path) -> bool {
    let in_backup = path
        .parent()
        .and_then(|p| p.file_name())
        .is_some_and(|name| name == BACKUP_DIR);
    if in_backup {
        return true;
    }

    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    if stem.ends_with("_preview") {
        return true;
    }
    is_frame_stem(stem)
}

/// `<stem>_frame_NN`, with at least two digits.
fn is_frame_stem(stem: &str) -> bool {
    match stem.rsplit_once("_frame_") {
        Some((base, digits)) => {
            !base.is_empty() && digits.len() >= 2 && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
