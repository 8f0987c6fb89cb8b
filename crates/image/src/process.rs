//! Upload processing: decode, normalize, enhance, encode.

use crate::{
    detect_format, encode::encode_jpeg, enhance::enhance, normalize::to_rgb, ImageError,
    ImageFormat, Result, DEFAULT_JPEG_QUALITY,
};

/// Options for the encoded output.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// JPEG-encoded original and enhanced versions of one upload.
#[derive(Debug, Clone)]
pub struct EnhancedPair {
    /// The normalized (opaque RGB) upload, re-encoded as JPEG
    pub original: Vec<u8>,
    /// The enhanced image as JPEG
    pub enhanced: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Format the upload was decoded from
    pub source_format: ImageFormat,
}

/// Run the full enhancement pipeline over raw upload bytes.
///
/// # Arguments
/// * `data` - Uploaded file contents
/// * `options` - Output encoding options
///
/// # Returns
/// The encoded original and enhanced images
pub fn enhance_upload(data: &[u8], options: &OutputOptions) -> Result<EnhancedPair> {
    let source_format = detect_format(data)?;
    let decoded = image::load_from_memory_with_format(data, source_format.decoder_format())?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidData("Image has no pixels".into()));
    }

    tracing::debug!(
        format = ?source_format,
        width,
        height,
        color = ?decoded.color(),
        "decoded upload"
    );

    let normalized = to_rgb(&decoded);
    let enhanced = enhance(&normalized);

    Ok(EnhancedPair {
        original: encode_jpeg(&normalized, options.quality)?,
        enhanced: encode_jpeg(&enhanced, options.quality)?,
        width,
        height,
        source_format,
    })
}
