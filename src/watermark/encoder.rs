//! Output encoding for composited images.
//!
//! The target file extension selects the output format. Formats without
//! native alpha support (JPEG, BMP) get the RGBA composite flattened onto an
//! opaque white background before encoding; the rest keep their alpha
//! channel.

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{ColorType, ImageEncoder as _, Rgb, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

use super::error::WatermarkError;

/// Output image format, selected by the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
}

impl OutputFormat {
    /// Map a file extension (without dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Map a path's extension to a format.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension used when rewriting output paths.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Gif => "gif",
        }
    }

    /// Whether the encoded output carries an alpha channel.
    pub fn supports_transparency(&self) -> bool {
        matches!(self, Self::Png | Self::Tiff | Self::Gif)
    }

    /// Format name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Gif => "gif",
        }
    }
}

/// Encode a composited RGBA image into the target format.
///
/// # Arguments
///
/// * `image` - The composited image
/// * `format` - Output format
/// * `jpeg_quality` - JPEG quality (1-100); ignored by other formats
///
/// # Returns
///
/// The encoded bytes ready to be written to the output file.
pub fn encode(
    image: &RgbaImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, WatermarkError> {
    let (width, height) = image.dimensions();

    // Alpha-less targets get flattened onto white before encoding
    let flattened;
    let (data, color): (&[u8], ColorType) = if format.supports_transparency() {
        (image.as_raw(), ColorType::Rgba8)
    } else {
        flattened = flatten_onto_white(image);
        (flattened.as_raw(), ColorType::Rgb8)
    };

    let mut output = Cursor::new(Vec::new());
    let result = match format {
        OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut output, jpeg_quality.clamp(1, 100))
                .write_image(data, width, height, color)
        }
        OutputFormat::Bmp => BmpEncoder::new(&mut output).encode(data, width, height, color),
        OutputFormat::Png => PngEncoder::new(&mut output).write_image(data, width, height, color),
        OutputFormat::Tiff => TiffEncoder::new(&mut output).write_image(data, width, height, color),
        OutputFormat::Gif => GifEncoder::new(&mut output).encode(data, width, height, color),
    };
    result.map_err(|e| WatermarkError::encode(format.name(), e.to_string()))?;

    Ok(output.into_inner())
}

/// Flatten an RGBA image onto an opaque white background.
///
/// Transparent regions become white; semi-transparent pixels blend with
/// white proportionally to their alpha.
fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut rgb = RgbImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |channel: u8| -> u8 {
            ((channel as u32 * alpha + 255 * (255 - alpha)) / 255) as u8
        };
        rgb.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    rgb
}
