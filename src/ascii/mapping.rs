//! Brightness to character mapping.

use super::charset::DensityRamp;
use crate::color::Color;

/// Default number of brightness levels fed to the quantizer.
pub const DEFAULT_LEVELS: usize = 256;

/// Whether dense glyphs should stand for bright or dark pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Light glyphs on a dark terminal: bright pixels get dense glyphs.
    #[default]
    DarkBackground,
    /// Dark glyphs on a light terminal: brightness is inverted first.
    LightBackground,
}

impl Polarity {
    /// Pick the polarity for a terminal background color.
    pub fn for_background(background: Color) -> Self {
        if background.grey() > 0.5 {
            Polarity::LightBackground
        } else {
            Polarity::DarkBackground
        }
    }
}

/// Maps brightness values to glyphs from a [`DensityRamp`].
///
/// The range `0..levels` is cut into `ramp.len()` equal buckets.
#[derive(Debug, Clone)]
pub struct GreyscaleQuantizer {
    ramp: DensityRamp,
    levels: usize,
    polarity: Polarity,
}

impl GreyscaleQuantizer {
    /// # Panics
    /// Panics if `levels` is zero.
    pub fn new(ramp: DensityRamp, levels: usize, polarity: Polarity) -> Self {
        assert!(levels > 0, "quantizer needs at least one brightness level");
        Self {
            ramp,
            levels,
            polarity,
        }
    }

    pub fn ramp(&self) -> &DensityRamp {
        &self.ramp
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Glyph for a brightness value (0 = black, 255 = white).
    pub fn quantize(&self, brightness: u8) -> char {
        let b = match self.polarity {
            Polarity::DarkBackground => brightness,
            Polarity::LightBackground => 255 - brightness,
        };
        self.ramp.glyph(self.bucket(b as usize))
    }

    /// Glyph for an (opaque) pixel.
    pub fn quantize_color(&self, color: Color) -> char {
        self.quantize(color.grey_level())
    }

    fn bucket(&self, value: usize) -> usize {
        let len = self.ramp.len();
        (value * len / self.levels).min(len - 1)
    }
}
