//! Watermark module for compositing an image watermark onto photos.
//!
//! This module contains the single-image half of the tool: placement math,
//! high-quality resizing, alpha compositing, and output encoding. The batch
//! walker drives it once per discovered file.
//!
//! # Features
//!
//! - **Two placement policies**: natural-size centered above the bottom
//!   edge, or scaled to a fraction of the base width and anchored at a
//!   corner with per-axis padding
//! - **Alpha compositing** with the watermark's own alpha channel as the
//!   blend mask
//! - **Lanczos3 resizing** via fast_image_resize for scaled placements
//! - **Format-aware encoding**: alpha-less targets (JPEG, BMP) are
//!   flattened onto a white background
//!
//! # Configuration Example
//!
//! ```yaml
//! watermark: watermark.png
//! placement:
//!   type: scaled-corner
//!   scale_factor: 0.15
//!   padding_x: 10
//!   padding_y: 10
//!   corner: bottom-right
//! ```

pub mod compositor;
pub mod encoder;
pub mod error;
pub mod placement;
pub mod processor;
pub mod resize;

// Re-export main types for convenience
pub use compositor::composite;
pub use encoder::{encode, OutputFormat};
pub use error::WatermarkError;
pub use placement::{
    resolve_placement, CornerAnchor, ImageDimensions, PlacementPolicy, PlacementPosition,
    ResolvedPlacement, WatermarkDimensions,
};
pub use processor::{load_image, load_watermark, process_file};
pub use resize::resize_rgba;
