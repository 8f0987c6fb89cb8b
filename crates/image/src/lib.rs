//! Image processing for Photoboost.
//!
//! This crate provides:
//! - Format detection from magic bytes
//! - Color-mode normalization (alpha flattening, RGB conversion)
//! - The fixed four-step tonal enhancement
//! - JPEG encoding of the normalized and enhanced images

#![warn(missing_docs)]

mod detect;
mod encode;
mod enhance;
mod error;
mod normalize;
mod process;

pub use detect::{detect_format, ImageFormat};
pub use encode::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use enhance::{
    enhance, luma, Enhancement, BRIGHTNESS_FACTOR, COLOR_FACTOR, CONTRAST_FACTOR,
    ENHANCEMENT_SEQUENCE, SHARPNESS_FACTOR,
};
pub use error::{ImageError, Result};
pub use normalize::{flatten_alpha, has_alpha_channel, to_rgb, FLATTEN_BACKGROUND};
pub use process::{enhance_upload, EnhancedPair, OutputOptions};
