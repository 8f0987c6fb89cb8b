//! Color-mode normalization to opaque 8-bit RGB.

use image::{DynamicImage, Rgb, RgbImage, Rgba};

/// Background that transparent pixels are flattened onto.
pub const FLATTEN_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Normalize any decoded image to opaque 8-bit RGB.
///
/// Images carrying an alpha channel are flattened onto [`FLATTEN_BACKGROUND`];
/// everything else is converted directly (grayscale is replicated across channels).
pub fn to_rgb(img: &DynamicImage) -> RgbImage {
    if has_alpha_channel(img) {
        flatten_alpha(img, FLATTEN_BACKGROUND)
    } else if let DynamicImage::ImageRgb8(rgb) = img {
        rgb.clone()
    } else {
        img.to_rgb8()
    }
}

/// Composite an image over a solid background, dropping its alpha channel.
pub fn flatten_alpha(img: &DynamicImage, background_color: [u8; 3]) -> RgbImage {
    let rgba_img = img.to_rgba8();
    let mut output = RgbImage::new(rgba_img.width(), rgba_img.height());

    for (x, y, pixel) in rgba_img.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        output.put_pixel(
            x,
            y,
            Rgb([
                composite(r, background_color[0], a),
                composite(g, background_color[1], a),
                composite(b, background_color[2], a),
            ]),
        );
    }

    output
}

/// Check if an image has an alpha channel
pub fn has_alpha_channel(img: &DynamicImage) -> bool {
    img.color().has_alpha()
}

/// `round((bg * (255 - a) + fg * a) / 255)` without floating point.
#[inline]
fn composite(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let v = u32::from(bg) * (255 - a) + u32::from(fg) * a + 128;
    ((v + (v >> 8)) >> 8) as u8
}
