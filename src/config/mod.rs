// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::watermark::{OutputFormat, PlacementPolicy};

fn default_jpeg_quality() -> u8 {
    90
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory scanned for images (read-only)
    pub input_dir: PathBuf,

    /// Root directory that receives the mirrored, watermarked tree
    pub output_dir: PathBuf,

    /// Watermark image file; transparency expected
    pub watermark: PathBuf,

    /// Watermark placement policy (default: centered-bottom, margin 10)
    #[serde(default)]
    pub placement: PlacementPolicy,

    /// JPEG encoding quality, 1-100 (default: 90)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Force every output into a single format, rewriting the extension.
    /// When absent, each output keeps its input's extension and format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        // Now perform the substitution (we know all vars exist)
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap() // Safe because we checked above
        });

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.input_dir.as_os_str().is_empty() {
            return Err("input_dir cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir cannot be empty".to_string());
        }
        if self.watermark.as_os_str().is_empty() {
            return Err("watermark path cannot be empty".to_string());
        }

        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(format!(
                "jpeg_quality {} is out of range. Quality must be 1-100.",
                self.jpeg_quality
            ));
        }

        if let PlacementPolicy::ScaledCorner { scale_factor, .. } = self.placement {
            if !(scale_factor > 0.0 && scale_factor <= 1.0) {
                return Err(format!(
                    "scale_factor {} is out of range. Scale factor must be in (0, 1].",
                    scale_factor
                ));
            }
        }

        Ok(())
    }
}
