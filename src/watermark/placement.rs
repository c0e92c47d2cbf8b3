//! Placement calculation for watermark positioning.
//!
//! This module resolves a [`PlacementPolicy`] against the dimensions of a
//! base image and a watermark into a concrete size and top-left offset.
//!
//! # Placement Policies
//!
//! - **CenteredBottom**: watermark kept at its natural size, horizontally
//!   centered, a fixed pixel margin above the bottom edge
//! - **ScaledCorner**: watermark resized (aspect preserved) to a fraction of
//!   the base image's width, anchored near a corner with per-axis padding
//!
//! # Example
//!
//! ```ignore
//! use sukashi::watermark::placement::{resolve_placement, ImageDimensions, WatermarkDimensions};
//! use sukashi::watermark::PlacementPolicy;
//!
//! let base = ImageDimensions { width: 800, height: 600 };
//! let watermark = WatermarkDimensions { width: 400, height: 200 };
//!
//! let placement = resolve_placement(
//!     &PlacementPolicy::CenteredBottom { margin: 10 },
//!     &base,
//!     &watermark,
//! )?;
//! assert_eq!((placement.position.x, placement.position.y), (200, 390));
//! ```

use serde::{Deserialize, Serialize};

use super::error::WatermarkError;

// Default values
fn default_margin() -> u32 {
    10
}

fn default_scale_factor() -> f32 {
    0.15
}

fn default_padding() -> u32 {
    10
}

fn default_corner() -> CornerAnchor {
    CornerAnchor::BottomRight
}

/// Dimensions of the base image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the watermark to be placed.
#[derive(Debug, Clone, Copy)]
pub struct WatermarkDimensions {
    pub width: u32,
    pub height: u32,
}

/// A single position where the watermark should be placed.
///
/// Coordinates may be negative when the watermark is larger than the base
/// image; the compositor clips to the visible region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Corner anchor for scaled placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Watermark placement policy.
///
/// Uses a serde tag to distinguish between policies in YAML:
/// ```yaml
/// placement:
///   type: scaled-corner
///   scale_factor: 0.15
///   padding_x: 10
///   padding_y: 10
///   corner: bottom-right
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PlacementPolicy {
    /// Natural watermark size, horizontally centered, anchored a fixed pixel
    /// margin above the bottom edge
    CenteredBottom {
        /// Distance between the watermark's bottom edge and the image's
        /// bottom edge in pixels (default: 10)
        #[serde(default = "default_margin")]
        margin: u32,
    },

    /// Watermark resized proportionally to a fraction of the base image's
    /// width, anchored near a corner
    ScaledCorner {
        /// Target watermark width as a fraction of the base width (default: 0.15)
        #[serde(default = "default_scale_factor")]
        scale_factor: f32,

        /// Horizontal padding from the anchored corner in pixels (default: 10)
        #[serde(default = "default_padding")]
        padding_x: u32,

        /// Vertical padding from the anchored corner in pixels (default: 10)
        #[serde(default = "default_padding")]
        padding_y: u32,

        /// Which corner to anchor to (default: bottom-right)
        #[serde(default = "default_corner")]
        corner: CornerAnchor,
    },
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::CenteredBottom {
            margin: default_margin(),
        }
    }
}

/// Resolved placement: the target watermark size plus its top-left offset.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPlacement {
    pub size: WatermarkDimensions,
    pub position: PlacementPosition,
}

/// Resolve a placement policy into a concrete size and position.
///
/// # Arguments
///
/// * `policy` - The configured placement policy
/// * `base` - Dimensions of the base image
/// * `watermark` - Natural dimensions of the watermark
///
/// # Returns
///
/// The target watermark size and the (x, y) offset where it should be
/// placed. Offsets may be negative; the compositor clips to bounds.
///
/// # Errors
///
/// Returns [`WatermarkError::Geometry`] when either input has a zero
/// dimension or the scaled target size rounds to zero.
pub fn resolve_placement(
    policy: &PlacementPolicy,
    base: &ImageDimensions,
    watermark: &WatermarkDimensions,
) -> Result<ResolvedPlacement, WatermarkError> {
    if base.width == 0 || base.height == 0 {
        return Err(WatermarkError::geometry(format!(
            "base image has degenerate dimensions {}x{}",
            base.width, base.height
        )));
    }
    if watermark.width == 0 || watermark.height == 0 {
        return Err(WatermarkError::geometry(format!(
            "watermark has degenerate dimensions {}x{}",
            watermark.width, watermark.height
        )));
    }

    match *policy {
        PlacementPolicy::CenteredBottom { margin } => {
            let x = (base.width as i32 - watermark.width as i32) / 2;
            let y = base.height as i32 - watermark.height as i32 - margin as i32;
            Ok(ResolvedPlacement {
                size: *watermark,
                position: PlacementPosition::new(x, y),
            })
        }

        PlacementPolicy::ScaledCorner {
            scale_factor,
            padding_x,
            padding_y,
            corner,
        } => {
            let target_width = (base.width as f64 * scale_factor as f64).round() as i64;
            if target_width <= 0 {
                return Err(WatermarkError::geometry(format!(
                    "scale factor {} of base width {} yields watermark width {}",
                    scale_factor, base.width, target_width
                )));
            }

            // Preserve the watermark's aspect ratio
            let target_height = (target_width as f64 * watermark.height as f64
                / watermark.width as f64)
                .round() as i64;
            let size = WatermarkDimensions {
                width: target_width as u32,
                height: target_height.max(1) as u32,
            };

            let position = corner_position(corner, base, &size, padding_x, padding_y);
            Ok(ResolvedPlacement { size, position })
        }
    }
}

/// Calculate the top-left offset for a corner-anchored watermark.
///
/// Placement is strictly padding-relative to the chosen corner; there is no
/// additional fixed offset.
fn corner_position(
    corner: CornerAnchor,
    base: &ImageDimensions,
    watermark: &WatermarkDimensions,
    padding_x: u32,
    padding_y: u32,
) -> PlacementPosition {
    let img_w = base.width as i32;
    let img_h = base.height as i32;
    let wm_w = watermark.width as i32;
    let wm_h = watermark.height as i32;
    let px = padding_x as i32;
    let py = padding_y as i32;

    match corner {
        CornerAnchor::TopLeft => PlacementPosition::new(px, py),
        CornerAnchor::TopRight => PlacementPosition::new(img_w - wm_w - px, py),
        CornerAnchor::BottomLeft => PlacementPosition::new(px, img_h - wm_h - py),
        CornerAnchor::BottomRight => {
            PlacementPosition::new(img_w - wm_w - px, img_h - wm_h - py)
        }
    }
}
