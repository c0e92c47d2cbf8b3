//! Watermark scaling via fast_image_resize.
//!
//! Uses Lanczos3 convolution for high-quality downscaling; nearest-neighbor
//! is never used.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;
use std::num::NonZeroU32;

use super::error::WatermarkError;

/// Resize an RGBA image to the exact target dimensions.
///
/// # Arguments
///
/// * `src` - Source image
/// * `target_w` - Target width in pixels
/// * `target_h` - Target height in pixels
///
/// # Errors
///
/// Returns [`WatermarkError::Geometry`] when any dimension is zero or the
/// resize operation fails internally.
pub fn resize_rgba(
    src: &RgbaImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, WatermarkError> {
    let src_width = NonZeroU32::new(src.width())
        .ok_or_else(|| WatermarkError::geometry("source width is 0"))?;
    let src_height = NonZeroU32::new(src.height())
        .ok_or_else(|| WatermarkError::geometry("source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| WatermarkError::geometry("target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| WatermarkError::geometry("target height is 0"))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        src.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| {
        WatermarkError::geometry(format!("failed to create source image buffer: {:?}", e))
    })?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| WatermarkError::geometry(format!("resize operation failed: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| WatermarkError::geometry("resized buffer has unexpected length"))
}
