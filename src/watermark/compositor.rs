//! Watermark compositor for blending a watermark onto a base image.
//!
//! This module handles alpha blending of the watermark at the position
//! resolved from the placement policy.
//!
//! # Features
//!
//! - Porter-Duff "over" alpha compositing driven by the watermark's own
//!   alpha channel
//! - Automatic RGBA normalization of the base image
//! - High-quality proportional resizing for scaled placements
//! - Clipping when the resolved position falls partially off-canvas
//!
//! # Example
//!
//! ```ignore
//! use sukashi::watermark::{composite, PlacementPolicy};
//!
//! let result = composite(&base, &watermark, &PlacementPolicy::default())?;
//! assert_eq!(result.dimensions(), (base.width(), base.height()));
//! ```

use image::{DynamicImage, Rgba, RgbaImage};

use super::error::WatermarkError;
use super::placement::{
    resolve_placement, ImageDimensions, PlacementPolicy, PlacementPosition, WatermarkDimensions,
};
use super::resize::resize_rgba;

/// Composite the watermark onto the base image per the placement policy.
///
/// The base is normalized to RGBA (a fully opaque alpha channel is added
/// when absent), the watermark is resized when the policy calls for it, and
/// the result always has the base image's dimensions.
///
/// # Errors
///
/// Returns [`WatermarkError::Geometry`] when the resolved placement would
/// require a degenerate watermark size.
pub fn composite(
    base: &DynamicImage,
    watermark: &RgbaImage,
    policy: &PlacementPolicy,
) -> Result<RgbaImage, WatermarkError> {
    let mut canvas = base.to_rgba8();

    let base_dims = ImageDimensions {
        width: canvas.width(),
        height: canvas.height(),
    };
    let wm_dims = WatermarkDimensions {
        width: watermark.width(),
        height: watermark.height(),
    };

    let placement = resolve_placement(policy, &base_dims, &wm_dims)?;

    let scaled;
    let layer: &RgbaImage =
        if placement.size.width == wm_dims.width && placement.size.height == wm_dims.height {
            watermark
        } else {
            scaled = resize_rgba(watermark, placement.size.width, placement.size.height)?;
            &scaled
        };

    blend_layer(&mut canvas, layer, placement.position);
    Ok(canvas)
}

/// Blend the watermark onto the target image at the given position.
///
/// The visible region is clamped to the target bounds; off-canvas pixels
/// are skipped rather than treated as an error.
fn blend_layer(target: &mut RgbaImage, watermark: &RgbaImage, position: PlacementPosition) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let wm_width = watermark.width() as i32;
    let wm_height = watermark.height() as i32;

    let x_start = position.x.max(0);
    let y_start = position.y.max(0);
    let x_end = (position.x + wm_width).min(target_width);
    let y_end = (position.y + wm_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let wx = (tx - position.x) as u32;
            let wy = (ty - position.y) as u32;

            let wm_pixel = watermark.get_pixel(wx, wy);
            let target_pixel = target.get_pixel(tx as u32, ty as u32);

            let blended = blend_pixels(*target_pixel, *wm_pixel);
            target.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Blend two pixels using the watermark's alpha channel as the mask.
///
/// Uses the "over" operator: result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    // Porter-Duff "over" operator
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}
