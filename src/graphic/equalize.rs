//! Luminance histogram equalization.

use super::PixelBuffer;
use crate::color::Color;

const BINS: usize = 256;

impl PixelBuffer {
    /// Equalize brightness in place.
    ///
    /// Builds a 256-bin histogram of each pixel's grey level, then remaps the
    /// level of every pixel to `round(255 * cdf[level] / total)`. Red, green
    /// and blue are scaled by the same factor so hue and saturation survive
    /// (up to clamping). Alpha is untouched. A histogram with a single
    /// occupied bin carries no contrast to redistribute and is left alone.
    pub fn equalize(&mut self) {
        let total = self.pixels.len();
        if total == 0 {
            return;
        }

        let mut histogram = [0usize; BINS];
        for px in &self.pixels {
            histogram[px.grey_level() as usize] += 1;
        }
        if histogram.iter().filter(|&&n| n > 0).count() < 2 {
            return;
        }

        let mut lut = [0u8; BINS];
        let mut cumulative = 0usize;
        for (level, count) in histogram.iter().enumerate() {
            cumulative += count;
            lut[level] = ((255 * cumulative) as f64 / total as f64).round() as u8;
        }

        for px in self.pixels_mut() {
            *px = remap_brightness(*px, lut[px.grey_level() as usize]);
        }
    }
}

fn remap_brightness(px: Color, level: u8) -> Color {
    let target = level as f64 / 255.0;
    let grey = px.grey();
    if grey <= f64::EPSILON {
        // Pure black has no chroma to preserve.
        return Color::rgba(target, target, target, px.a);
    }
    let k = target / grey;
    Color::rgba(
        (px.r * k).clamp(0.0, 1.0),
        (px.g * k).clamp(0.0, 1.0),
        (px.b * k).clamp(0.0, 1.0),
        px.a,
    )
}
