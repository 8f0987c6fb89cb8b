//! JPEG encoding with the image crate.

use crate::{ImageError, Result};
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;

/// Quality used for both stored and embedded JPEGs.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encode an RGB image as JPEG.
///
/// # Arguments
/// * `img` - Opaque 8-bit RGB image
/// * `quality` - JPEG quality (1-100)
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(ImageError::Encode(format!(
            "JPEG quality must be between 1 and 100, got {quality}"
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone()).write_to(&mut buffer, ImageOutputFormat::Jpeg(quality))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detect_format, ImageFormat};
    use image::Rgb;

    #[test]
    fn test_encode_produces_jpeg() {
        let img = RgbImage::from_pixel(16, 8, Rgb([10, 120, 240]));
        let bytes = encode_jpeg(&img, DEFAULT_JPEG_QUALITY).unwrap();

        assert_eq!(detect_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_encode_rejects_bad_quality() {
        let img = RgbImage::new(1, 1);
        assert!(matches!(encode_jpeg(&img, 0), Err(ImageError::Encode(_))));
        assert!(matches!(encode_jpeg(&img, 101), Err(ImageError::Encode(_))));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let img = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8]));
        let high = encode_jpeg(&img, 95).unwrap();
        let low = encode_jpeg(&img, 20).unwrap();
        assert!(low.len() < high.len());
    }
}
