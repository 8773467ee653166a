//! Per-file processing options.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::pipeline::Backend;

use super::Colour;

/// Default flood-fill colour tolerance.
pub const DEFAULT_TOLERANCE: u32 = 40;

/// Default tolerance for fringe cleanup. Tuned independently of the flood tolerance.
pub const DEFAULT_FRINGE_TOLERANCE: u32 = 80;

/// Default number of fringe cleanup passes.
pub const DEFAULT_FRINGE_PASSES: u32 = 2;

/// Default padding kept around content when cropping.
pub const DEFAULT_PADDING: u32 = 2;

/// Folder name to longest-edge size, used when no explicit size is given.
pub type SizePolicy = BTreeMap<String, u32>;

/// The built-in size policy for the standard asset folders.
pub fn default_size_policy() -> SizePolicy {
    [
        ("characters", 256),
        ("enemies", 192),
        ("bosses", 256),
        ("npcs", 128),
        ("items", 64),
        ("equipment", 64),
        ("effects", 128),
        ("zones", 128),
    ]
    .into_iter()
    .map(|(name, size)| (name.to_string(), size))
    .collect()
}

/// Immutable configuration consumed by every stage of a single file run.
///
/// Per-file overrides are derived as new values (see [`ProcessingOptions::for_file`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingOptions {
    pub tolerance: u32,
    pub fringe_tolerance: u32,
    pub fringe_passes: u32,
    pub crop: bool,
    pub padding: u32,
    /// Longest-edge size to downscale to.
    pub target_size: Option<u32>,
    /// Split the result into this many equal-width frames.
    pub split_frames: Option<u32>,
    /// Write outputs here instead of overwriting the input.
    pub output_dir: Option<PathBuf>,
    /// Root that relative output paths are computed against.
    pub root: Option<PathBuf>,
    pub backup: bool,
    pub dry_run: bool,
    pub report: bool,
    pub preview: bool,
    /// Skip detection and use this colour as the background.
    pub background: Option<Colour>,
    pub backend: Backend,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            fringe_tolerance: DEFAULT_FRINGE_TOLERANCE,
            fringe_passes: DEFAULT_FRINGE_PASSES,
            crop: true,
            padding: DEFAULT_PADDING,
            target_size: None,
            split_frames: None,
            output_dir: None,
            root: None,
            backup: false,
            dry_run: false,
            report: false,
            preview: true,
            background: None,
            backend: Backend::default(),
        }
    }
}

impl ProcessingOptions {
    /// Derive the options for one file, applying the folder size policy
    /// when no explicit target size is set.
    pub fn for_file(&self, path: &Path, policy: &SizePolicy) -> ProcessingOptions {
        let mut derived = self.clone();
        if derived.target_size.is_none() {
            derived.target_size = folder_name(path).and_then(|name| policy.get(name).copied());
        }
        derived
    }

    /// Resolve where the processed image for `input` is written.
    ///
    /// Without an output directory this is the input itself. With one, the
    /// input's path relative to `root` is preserved beneath it; inputs
    /// outside the root keep only their file name.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let Some(out_dir) = &self.output_dir else {
            return input.to_path_buf();
        };

        let relative = self
            .root
            .as_deref()
            .and_then(|root| input.strip_prefix(root).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| input.file_name().map(PathBuf::from))
            .unwrap_or_else(|| input.to_path_buf());

        out_dir.join(relative)
    }

    /// Directory the batch report is written to.
    pub fn report_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Name of the file's immediate parent directory.
fn folder_name(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}
