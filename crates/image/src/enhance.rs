//! Fixed tonal enhancement.
//!
//! Every adjustment interpolates between a *degenerate* version of the image
//! and the image itself: `out = degenerate + factor * (image - degenerate)`.
//! A factor of 1.0 is the identity, larger factors push the image further away
//! from its degenerate version.

use image::{Rgb, RgbImage};

/// Contrast multiplier.
pub const CONTRAST_FACTOR: f32 = 1.20;
/// Brightness multiplier.
pub const BRIGHTNESS_FACTOR: f32 = 1.08;
/// Color saturation multiplier.
pub const COLOR_FACTOR: f32 = 1.20;
/// Sharpness multiplier.
pub const SHARPNESS_FACTOR: f32 = 1.50;

/// The adjustments [`enhance`] applies, in order.
pub const ENHANCEMENT_SEQUENCE: [(Enhancement, f32); 4] = [
    (Enhancement::Contrast, CONTRAST_FACTOR),
    (Enhancement::Brightness, BRIGHTNESS_FACTOR),
    (Enhancement::Color, COLOR_FACTOR),
    (Enhancement::Sharpness, SHARPNESS_FACTOR),
];

/// 3x3 smoothing kernel used as the sharpness reference.
const SMOOTH_KERNEL: [u32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
const SMOOTH_SCALE: f32 = 13.0;

#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 16 * 1024;

/// A single tonal adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enhancement {
    /// Spread around the mean luma of the whole image.
    Contrast,
    /// Scale towards or away from black.
    Brightness,
    /// Spread around each pixel's own luma.
    Color,
    /// Spread around a smoothed copy of the image.
    Sharpness,
}

impl Enhancement {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Enhancement::Contrast => "contrast",
            Enhancement::Brightness => "brightness",
            Enhancement::Color => "color",
            Enhancement::Sharpness => "sharpness",
        }
    }

    /// Apply this adjustment with the given factor.
    pub fn apply(&self, image: &RgbImage, factor: f32) -> RgbImage {
        let degenerate = self.degenerate(image);
        blend(&degenerate, image, factor)
    }

    /// The reference image this adjustment interpolates from.
    fn degenerate(&self, image: &RgbImage) -> RgbImage {
        let (width, height) = image.dimensions();
        match self {
            Enhancement::Contrast => {
                let mean = mean_luma(image);
                RgbImage::from_pixel(width, height, Rgb([mean, mean, mean]))
            }
            Enhancement::Brightness => RgbImage::new(width, height),
            Enhancement::Color => grayscale(image),
            Enhancement::Sharpness => smooth(image),
        }
    }
}

/// Apply contrast, brightness, color and sharpness with their fixed factors.
pub fn enhance(image: &RgbImage) -> RgbImage {
    let mut current = image.clone();
    for (enhancement, factor) in ENHANCEMENT_SEQUENCE {
        current = enhancement.apply(&current, factor);
        tracing::trace!(step = enhancement.name(), factor, "enhancement applied");
    }
    current
}

/// ITU-R 601 luma in 16-bit fixed point.
#[inline]
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16) as u8
}

fn mean_luma(image: &RgbImage) -> u8 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0;
    }
    let sum: u64 = image.pixels().map(|p| u64::from(luma(p))).sum();
    (sum as f64 / count as f64 + 0.5) as u8
}

fn grayscale(image: &RgbImage) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let l = luma(pixel);
        *pixel = Rgb([l, l, l]);
    }
    out
}

/// Convolve with [`SMOOTH_KERNEL`]; the one-pixel border is copied unchanged.
fn smooth(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0u32; 3];
            for (k, weight) in SMOOTH_KERNEL.iter().enumerate() {
                let sx = x + k as u32 % 3 - 1;
                let sy = y + k as u32 / 3 - 1;
                let p = image.get_pixel(sx, sy);
                for c in 0..3 {
                    sums[c] += weight * u32::from(p[c]);
                }
            }
            let smoothed = sums.map(|s| clamp_u8(s as f32 / SMOOTH_SCALE + 0.5));
            out.put_pixel(x, y, Rgb(smoothed));
        }
    }
    out
}

/// `degenerate + factor * (image - degenerate)`, truncated and clamped per channel.
fn blend(degenerate: &RgbImage, image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = image.clone();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(PARALLEL_CHUNK)
            .zip(degenerate.par_chunks(PARALLEL_CHUNK))
            .zip(image.par_chunks(PARALLEL_CHUNK))
            .for_each(|((o, d), s)| blend_into(o, d, s, factor));
    }

    #[cfg(not(feature = "parallel"))]
    blend_into(&mut out, degenerate, image, factor);

    out
}

#[inline]
fn blend_into(out: &mut [u8], degenerate: &[u8], image: &[u8], factor: f32) {
    for ((o, &d), &s) in out.iter_mut().zip(degenerate).zip(image) {
        let d = f32::from(d);
        *o = clamp_u8(d + factor * (f32::from(s) - d));
    }
}

#[inline]
fn clamp_u8(value: f32) -> u8 {
    if value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}
