//! Batch walker: mirror a directory tree while watermarking each image.
//!
//! Recursively enumerates eligible images under the input root, mirrors
//! their relative paths into the output root, and runs the watermark
//! pipeline on each one. A single file's failure is logged and skipped; the
//! walk always runs to completion and reports a summary.

use chrono::{DateTime, Utc};
use image::RgbaImage;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::watermark::{process_file, OutputFormat, WatermarkError};

/// File extensions eligible for processing (lowercase, without dot).
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

/// A file that failed to process, tagged with its relative path.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

/// Result of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    /// Relative paths of successfully processed files
    pub processed: Vec<String>,
    /// Relative paths and error messages of failed files
    pub failed: Vec<FileFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchSummary {
    /// True when every discovered file was processed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Walk the input tree and watermark every eligible image.
///
/// Traversal is sequential and deterministic (entries sorted by file name).
/// Case-variant duplicates of an already-seen path are skipped so a file is
/// processed at most once on case-insensitive filesystems.
pub fn process_tree(config: &Config, watermark: &RgbaImage) -> BatchSummary {
    let started_at = Utc::now();

    // Seen-set is scoped to this call, not module state
    let mut seen: HashSet<String> = HashSet::new();
    let mut processed = Vec::new();
    let mut failed = Vec::new();

    for entry in WalkDir::new(&config.input_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_supported_extension(path) {
            continue;
        }

        let key = path.to_string_lossy().to_lowercase();
        if !seen.insert(key) {
            tracing::debug!(path = %path.display(), "Skipping case-variant duplicate");
            continue;
        }

        let relative = match path.strip_prefix(&config.input_dir) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => continue, // entries always live under the walk root
        };
        let relative_str = relative.to_string_lossy().into_owned();

        match process_one(path, &relative, config, watermark) {
            Ok(output) => {
                tracing::info!(
                    input = %relative_str,
                    output = %output.display(),
                    "Watermarked image"
                );
                processed.push(relative_str);
            }
            Err(e) => {
                tracing::warn!(input = %relative_str, error = %e, "Failed to process image");
                failed.push(FileFailure {
                    path: relative_str,
                    error: e.to_string(),
                });
            }
        }
    }

    BatchSummary {
        processed,
        failed,
        started_at,
        finished_at: Utc::now(),
    }
}

/// Process a single discovered file into its mirrored output path.
fn process_one(
    input: &Path,
    relative: &Path,
    config: &Config,
    watermark: &RgbaImage,
) -> Result<PathBuf, WatermarkError> {
    let mut output = config.output_dir.join(relative);

    let format = match config.output_format {
        Some(format) => {
            output.set_extension(format.extension());
            format
        }
        None => OutputFormat::from_path(&output).ok_or_else(|| {
            WatermarkError::decode(format!(
                "no output format for extension of {}",
                output.display()
            ))
        })?,
    };

    if let Some(parent) = output.parent() {
        // Idempotent; succeeds when the directory already exists
        fs::create_dir_all(parent)
            .map_err(|e| WatermarkError::io(format!("{}: {}", parent.display(), e)))?;
    }

    process_file(
        input,
        &output,
        watermark,
        &config.placement,
        format,
        config.jpeg_quality,
    )?;

    Ok(output)
}

/// Whether a path's extension (case-insensitive) is in the supported set.
fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lowered = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lowered.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo.jpg", true)]
    #[case("photo.JPG", true)]
    #[case("photo.Jpeg", true)]
    #[case("scan.TIFF", true)]
    #[case("anim.gif", true)]
    #[case("image.bmp", true)]
    #[case("shot.png", true)]
    #[case("notes.txt", false)]
    #[case("archive.webp", false)]
    #[case("no_extension", false)]
    fn test_is_supported_extension(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_supported_extension(Path::new(name)), expected);
    }

    #[test]
    fn test_summary_success_only_without_failures() {
        let now = Utc::now();
        let mut summary = BatchSummary {
            processed: vec!["a/one.png".to_string()],
            failed: vec![],
            started_at: now,
            finished_at: now,
        };
        assert!(summary.is_success());
        assert_eq!(summary.processed_count(), 1);

        summary.failed.push(FileFailure {
            path: "b/two.png".to_string(),
            error: "boom".to_string(),
        });
        assert!(!summary.is_success());
        assert_eq!(summary.failed_count(), 1);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let now = Utc::now();
        let summary = BatchSummary {
            processed: vec!["a/one.png".to_string()],
            failed: vec![FileFailure {
                path: "b/two.png".to_string(),
                error: "decode failed".to_string(),
            }],
            started_at: now,
            finished_at: now,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("a/one.png"));
        assert!(json.contains("decode failed"));
        assert!(json.contains("started_at"));
    }
}
