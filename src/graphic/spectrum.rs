//! Synthetic color chart for checking how a terminal renders the palette.

use super::PixelBuffer;
use crate::color::Color;

/// Fraction of the width taken by each of the four gradient bars.
const BAR_FRACTION: f64 = 0.05;

/// Generate a `width` x `height` spectrum chart.
///
/// The left part sweeps hue across x; saturation rises to full over the top
/// half and value falls to zero over the bottom half. Four narrow bars follow
/// on the right: a grey ramp, then red, green and blue each fading to white.
pub fn generate_spectrum(width: usize, height: usize) -> PixelBuffer {
    let bar_width = (width as f64 * BAR_FRACTION) as usize;
    let spec_width = width - bar_width * 4;
    let half = height as f64 / 2.0;
    let mut res = PixelBuffer::new(width, height);

    for y in 0..height {
        let fy = y as f64;
        let saturation = if fy > half { 1.0 } else { fy / half };
        let value = if fy < half { 1.0 } else { 1.0 - (fy - half) / half };

        for x in 0..spec_width {
            let hue = x as f64 / spec_width as f64;
            res.set(x, y, Color::from_hsv(hue, saturation, value));
        }

        let t = fy / height as f64;
        let bars = [
            Color::from_hsv(0.0, 0.0, t),
            Color::rgb(1.0, t, t),
            Color::rgb(t, 1.0, t),
            Color::rgb(t, t, 1.0),
        ];
        for (i, color) in bars.iter().enumerate() {
            let offset = spec_width + i * bar_width;
            for x in 0..bar_width {
                res.set(offset + x, y, *color);
            }
        }
    }

    res
}
