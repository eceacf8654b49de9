//! Batch Processing Module
//!
//! Collects image files from a directory and validates many uploads in
//! parallel. Results keep input order.

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::metrics::{QuickValidationResult, ValidationResult};
use crate::report::QualityVerdict;
use crate::validator::{quick_validate, validate_image_quality};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "jpe", "jfif", "webp", "gif", "tiff", "tif", "bmp",
];

const DANGEROUS_DIRS: &[&str] = &[
    "/", "/System", "/usr", "/bin", "/sbin", "/etc", "/var", "/private", "/Library",
    "/Applications", "/Users", "/home", "/root", "/boot", "/dev", "/proc", "/sys",
];

/// Refuse to walk system directories; a recursive scan there is almost
/// certainly a typo.
pub fn check_dangerous_directory(path: &Path) -> std::result::Result<(), String> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let path_str = canonical.to_string_lossy();

    if DANGEROUS_DIRS.iter().any(|d| path_str == *d) {
        return Err(format!(
            "🚨 Refusing to scan protected system directory '{}'. Please point at a photo folder instead.",
            path_str
        ));
    }
    Ok(())
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Image files under `dir`, sorted by path so runs are reproducible.
pub fn collect_images(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let walker = if recursive {
        WalkDir::new(dir).follow_links(true)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_image_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

pub fn validate_file(path: &Path, config: &ValidationConfig) -> Result<ValidationResult> {
    let bytes = std::fs::read(path)?;
    validate_image_quality(&bytes, config)
}

pub fn quick_validate_file(path: &Path) -> Result<QuickValidationResult> {
    let bytes = std::fs::read(path)?;
    quick_validate(&bytes)
}

/// Validate every file in parallel on the current rayon pool.
pub fn validate_files(
    paths: &[PathBuf],
    config: &ValidationConfig,
) -> Vec<(PathBuf, Result<ValidationResult>)> {
    validate_files_with_progress(paths, config, |_| {})
}

/// Like [`validate_files`], calling `on_done` from the worker thread after
/// each file finishes (in completion order, not input order).
pub fn validate_files_with_progress<F>(
    paths: &[PathBuf],
    config: &ValidationConfig,
    on_done: F,
) -> Vec<(PathBuf, Result<ValidationResult>)>
where
    F: Fn(&Path) + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let result = validate_file(path, config);
            on_done(path);
            (path.clone(), result)
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub total: usize,
    pub accepted: usize,
    pub warned: usize,
    pub rejected: usize,
    pub failed: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: QualityVerdict) {
        self.total += 1;
        match verdict {
            QualityVerdict::Accepted => self.accepted += 1,
            QualityVerdict::Warning => self.warned += 1,
            QualityVerdict::Rejected => self.rejected += 1,
        }
    }

    pub fn fail(&mut self, path: PathBuf, error: String) {
        self.total += 1;
        self.failed += 1;
        self.errors.push((path, error));
    }

    /// Share of files that may proceed to analysis (accepted or warned).
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            ((self.accepted + self.warned) as f64 / self.total as f64) * 100.0
        }
    }

    pub fn all_passed(&self) -> bool {
        self.rejected == 0 && self.failed == 0
    }
}
