//! Project config (rip.yaml) parsing.
//!
//! The config supplies per-project defaults for the processing options,
//! the folder size policy, and extra exclude patterns. Command-line flags
//! override anything set here.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RipError, Result};
use crate::types::{default_size_policy, ProcessingOptions, SizePolicy};

/// Project config loaded from rip.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RipConfig {
    /// Flood-fill colour tolerance.
    pub tolerance: Option<u32>,

    /// Fringe cleanup tolerance.
    pub fringe_tolerance: Option<u32>,

    /// Number of fringe cleanup passes.
    pub fringe_passes: Option<u32>,

    /// Padding kept around content when cropping.
    pub padding: Option<u32>,

    pub crop: Option<bool>,

    pub preview: Option<bool>,

    /// Folder name to longest-edge size. Merged over the built-in table.
    pub target_sizes: BTreeMap<String, u32>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

impl RipConfig {
    /// Load config from a rip.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RipError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| RipError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check rip.yaml syntax".to_string()),
        })
    }

    /// Options with this config's values applied over the defaults.
    pub fn base_options(&self) -> ProcessingOptions {
        let defaults = ProcessingOptions::default();
        ProcessingOptions {
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            fringe_tolerance: self.fringe_tolerance.unwrap_or(defaults.fringe_tolerance),
            fringe_passes: self.fringe_passes.unwrap_or(defaults.fringe_passes),
            padding: self.padding.unwrap_or(defaults.padding),
            crop: self.crop.unwrap_or(defaults.crop),
            preview: self.preview.unwrap_or(defaults.preview),
            ..defaults
        }
    }

    /// The built-in size policy with this config's entries layered on top.
    pub fn size_policy(&self) -> SizePolicy {
        let mut policy = default_size_policy();
        policy.extend(self.target_sizes.iter().map(|(k, v)| (k.clone(), *v)));
        policy
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }
}

/// Simple glob matching for exclude patterns.
///
/// Supports `**/dir/*`, `*suffix`, `dir/*`, and plain substrings.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.ends_with(suffix) || path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix)) || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
