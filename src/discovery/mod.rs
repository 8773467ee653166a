//! Finding the sprites to process.
//!
//! A run targets either a single file or a directory tree. For a directory,
//! an optional `rip.yaml` at its root supplies project defaults, and
//! `--batch N` narrows the scan to the `batch_N` subdirectory.
//!
//! # Example
//!
//! ```ignore
//! use ripper::discovery::discover;
//!
//! let found = discover("./generated", None, None)?;
//! println!("Found {} sprites", found.files.len());
//! ```

mod config;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{RipError, Result};

pub use config::RipConfig;
pub use scanner::{is_generated, is_png, scan_directory};

/// The name of the project config file.
pub const CONFIG_FILENAME: &str = "rip.yaml";

/// Result of resolving a run target.
#[derive(Debug)]
pub struct Discovery {
    /// The processing root that output paths and the report are relative to.
    pub root: PathBuf,

    /// The loaded config (default if none was found).
    pub config: RipConfig,

    /// Whether a config file was found.
    pub has_config: bool,

    /// Files to process, in batch order.
    pub files: Vec<PathBuf>,
}

/// Subdirectory holding batch `n` under `root`.
pub fn batch_dir(root: &Path, n: u32) -> PathBuf {
    root.join(format!("batch_{}", n))
}

/// Resolve the files for a run.
///
/// `config_path` overrides the `rip.yaml` lookup. A single file is processed
/// as given, with its parent as the root; `batch` applies only to directories.
pub fn discover(
    target: impl AsRef<Path>,
    batch: Option<u32>,
    config_path: Option<&Path>,
) -> Result<Discovery> {
    let target = target.as_ref();

    if !target.exists() {
        return Err(RipError::Io {
            path: target.to_path_buf(),
            message: "Path does not exist".to_string(),
        });
    }

    let root = if target.is_dir() {
        target.to_path_buf()
    } else {
        target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };

    let (config, has_config) = load_config(&root, config_path)?;

    let files = if target.is_dir() {
        let scan_root = match batch {
            Some(n) => {
                let dir = batch_dir(&root, n);
                if !dir.is_dir() {
                    return Err(RipError::Config {
                        message: format!("Batch directory not found: {}", dir.display()),
                        help: Some(format!("Expected batch folders like {}", dir.display())),
                    });
                }
                dir
            }
            None => root.clone(),
        };
        scan_directory(&scan_root, &config)
    } else {
        vec![target.to_path_buf()]
    };

    log::debug!("discovered {} file(s) under {}", files.len(), root.display());

    Ok(Discovery {
        root,
        config,
        has_config,
        files,
    })
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<(RipConfig, bool)> {
    if let Some(path) = explicit {
        return Ok((RipConfig::load(path)?, true));
    }

    let path = root.join(CONFIG_FILENAME);
    if path.exists() {
        Ok((RipConfig::load(&path)?, true))
    } else {
        Ok((RipConfig::default(), false))
    }
}
