//! Bilinear resampling.

use super::PixelBuffer;
use crate::color::Color;

impl PixelBuffer {
    /// Scale to `new_width` x `new_height` with bilinear interpolation.
    ///
    /// Destination pixel centres are mapped back into source space with
    /// `(x + 0.5) * src / dst - 0.5`. Samples that fall outside the source
    /// replicate the nearest edge pixel. Alpha is interpolated like the color
    /// channels.
    ///
    /// # Panics
    /// Panics if either target dimension is zero or the source is empty.
    pub fn resample(&self, new_width: usize, new_height: usize) -> PixelBuffer {
        assert!(
            new_width > 0 && new_height > 0,
            "cannot resample to a zero-sized target ({}x{})",
            new_width,
            new_height
        );
        assert!(
            self.width > 0 && self.height > 0,
            "cannot resample an empty {}x{} buffer",
            self.width,
            self.height
        );

        let x_ratio = self.width as f64 / new_width as f64;
        let y_ratio = self.height as f64 / new_height as f64;

        let columns: Vec<Sample> = (0..new_width)
            .map(|x| Sample::new(x, x_ratio, self.width))
            .collect();

        let mut pixels = Vec::with_capacity(new_width * new_height);
        for y in 0..new_height {
            let row = Sample::new(y, y_ratio, self.height);
            for col in &columns {
                let top = lerp(self.get(col.lo, row.lo), self.get(col.hi, row.lo), col.frac);
                let bottom = lerp(self.get(col.lo, row.hi), self.get(col.hi, row.hi), col.frac);
                pixels.push(lerp(top, bottom, row.frac));
            }
        }

        PixelBuffer::from_pixels(new_width, new_height, pixels)
    }
}

/// Pair of source indices and the weight of the upper one along one axis.
#[derive(Debug, Clone, Copy)]
struct Sample {
    lo: usize,
    hi: usize,
    frac: f64,
}

impl Sample {
    fn new(dst: usize, ratio: f64, src_len: usize) -> Self {
        let pos = (dst as f64 + 0.5) * ratio - 0.5;
        let base = pos.floor();
        let frac = pos - base;
        let last = (src_len - 1) as f64;
        Sample {
            lo: base.clamp(0.0, last) as usize,
            hi: (base + 1.0).clamp(0.0, last) as usize,
            frac,
        }
    }
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    let mix = |p: f64, q: f64| p + (q - p) * t;
    Color::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}
