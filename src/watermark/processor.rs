//! Per-file watermark pipeline: load, composite, encode, write.
//!
//! This module provides the high-level API invoked by the batch walker for
//! each discovered image. Every stage maps its failures into the
//! [`WatermarkError`] taxonomy so the walker can report and continue.

use image::io::Reader as ImageReader;
use image::{DynamicImage, RgbaImage};
use std::fs;
use std::path::Path;

use super::compositor::composite;
use super::encoder::{encode, OutputFormat};
use super::error::WatermarkError;
use super::placement::PlacementPolicy;

/// Load and decode an image file.
///
/// The format is guessed from the file content rather than trusted from the
/// extension, so a mislabeled file still decodes when its data is valid.
pub fn load_image(path: &Path) -> Result<DynamicImage, WatermarkError> {
    let reader = ImageReader::open(path)
        .map_err(|e| WatermarkError::io(format!("{}: {}", path.display(), e)))?;

    reader
        .with_guessed_format()
        .map_err(|e| WatermarkError::io(format!("{}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| WatermarkError::decode(format!("{}: {}", path.display(), e)))
}

/// Load the watermark image and normalize it to RGBA.
pub fn load_watermark(path: &Path) -> Result<RgbaImage, WatermarkError> {
    Ok(load_image(path)?.to_rgba8())
}

/// Watermark a single file and write the encoded result.
///
/// # Arguments
///
/// * `input` - Source image path
/// * `output` - Destination path (parent directory must exist)
/// * `watermark` - Decoded watermark image
/// * `policy` - Placement policy
/// * `format` - Output encoding format
/// * `jpeg_quality` - JPEG quality (1-100)
pub fn process_file(
    input: &Path,
    output: &Path,
    watermark: &RgbaImage,
    policy: &PlacementPolicy,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<(), WatermarkError> {
    let base = load_image(input)?;
    let composited = composite(&base, watermark, policy)?;
    let encoded = encode(&composited, format, jpeg_quality)?;

    fs::write(output, encoded)
        .map_err(|e| WatermarkError::io(format!("{}: {}", output.display(), e)))
}
