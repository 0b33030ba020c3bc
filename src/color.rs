//! RGBA color values used throughout the rendering pipeline.
//!
//! Channels are `f64` in the range 0.0-1.0. Colors are plain `Copy` values;
//! every operation returns a new color.

use std::fmt;
use std::str::FromStr;

/// An RGBA color with floating point channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create an opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with an explicit alpha channel.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Create a color from 8-bit channels including alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    /// Convert to 8-bit channels, rounding to nearest. Alpha is dropped.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    /// Perceptual brightness using the ITU-R BT.601 luma weights.
    ///
    /// Y = 0.299*R + 0.587*G + 0.114*B
    pub fn grey(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Brightness quantized to 0-255.
    pub fn grey_level(self) -> u8 {
        to_byte(self.grey())
    }

    /// Composite this color over an opaque background.
    ///
    /// `result = src*alpha + bg*(1-alpha)`, clamped, always opaque.
    pub fn opacify(self, background: Color) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        let blend = |src: f64, bg: f64| (src * a + bg * (1.0 - a)).clamp(0.0, 1.0);
        Color::rgb(
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }

    /// Clamp every channel to [0, 1].
    pub fn clamped(self) -> Color {
        Color::rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Per-channel average of two colors, alpha included.
    pub fn mean(self, other: Color) -> Color {
        Color::rgba(
            (self.r + other.r) / 2.0,
            (self.g + other.g) / 2.0,
            (self.b + other.b) / 2.0,
            (self.a + other.a) / 2.0,
        )
    }

    /// Squared Euclidean distance over the RGB channels.
    pub fn distance_sq(self, other: Color) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Convert to (hue, saturation, value), each in [0, 1].
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let v = max;
        let s = if max > 0.0 { delta / max } else { 0.0 };
        if delta <= 0.0 {
            return (0.0, s, v);
        }

        let h = if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (h / 6.0, s, v)
    }

    /// Build an opaque color from (hue, saturation, value), each in [0, 1].
    ///
    /// Hue wraps, so 1.0 is the same as 0.0.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Color {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Color::rgb(v, v, v);
        }

        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as u8 {
            0 => Color::rgb(v, t, p),
            1 => Color::rgb(q, v, p),
            2 => Color::rgb(p, v, t),
            3 => Color::rgb(p, q, v),
            4 => Color::rgb(t, p, v),
            _ => Color::rgb(v, p, q),
        }
    }

    /// Look up a CSS / X11 color name.
    pub fn named(name: &str) -> Option<Color> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "lime" => (0, 255, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "cyan" | "aqua" => (0, 255, 255),
            "magenta" | "fuchsia" => (255, 0, 255),
            "grey" | "gray" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "darkgrey" | "darkgray" => (169, 169, 169),
            "lightgrey" | "lightgray" => (211, 211, 211),
            "maroon" => (128, 0, 0),
            "olive" => (128, 128, 0),
            "navy" => (0, 0, 128),
            "teal" => (0, 128, 128),
            "purple" => (128, 0, 128),
            "orange" => (255, 165, 0),
            "pink" => (255, 192, 203),
            "brown" => (165, 42, 42),
            _ => return None,
        };
        Some(Color::from_rgb8(r, g, b))
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Error returned when a color string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}' (expected a CSS/X11 name or #rgb / #rrggbb)")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }
        Color::named(trimmed).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Color::from_rgb8(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_grey_weights() {
        assert!(approx(Color::WHITE.grey(), 1.0));
        assert!(approx(Color::BLACK.grey(), 0.0));
        assert!(approx(Color::rgb(1.0, 0.0, 0.0).grey(), 0.299));
        assert_eq!(Color::rgb(0.0, 1.0, 0.0).grey_level(), 150);
    }

    #[test]
    fn test_opacify_fully_transparent_is_background() {
        let bg = Color::rgb(0.2, 0.4, 0.6);
        assert_eq!(Color::TRANSPARENT.opacify(bg), bg);
    }

    #[test]
    fn test_opacify_half_alpha() {
        let c = Color::rgba(1.0, 0.0, 0.0, 0.5).opacify(Color::BLACK);
        assert!(approx(c.r, 0.5));
        assert!(approx(c.g, 0.0));
        assert!(approx(c.a, 1.0));
    }

    #[test]
    fn test_opacify_clamps() {
        let c = Color::rgba(1.5, -0.5, 0.5, 1.0).opacify(Color::BLACK);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn test_hsv_primaries() {
        let red = Color::from_hsv(0.0, 1.0, 1.0);
        assert_eq!(red.to_rgb8(), (255, 0, 0));
        let green = Color::from_hsv(1.0 / 3.0, 1.0, 1.0);
        assert_eq!(green.to_rgb8(), (0, 255, 0));
        let blue = Color::from_hsv(2.0 / 3.0, 1.0, 1.0);
        assert_eq!(blue.to_rgb8(), (0, 0, 255));
        assert_eq!(Color::from_hsv(1.0, 1.0, 1.0).to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn test_hsv_round_trip_orange() {
        let orange = Color::from_rgb8(255, 165, 0);
        let (h, s, v) = orange.to_hsv();
        assert_eq!(Color::from_hsv(h, s, v).to_rgb8(), (255, 165, 0));
    }

    #[test]
    fn test_hsv_grey_has_zero_saturation() {
        let (_, s, v) = Color::rgb(0.5, 0.5, 0.5).to_hsv();
        assert_eq!(s, 0.0);
        assert!(approx(v, 0.5));
    }

    #[test]
    fn test_parse_names_and_hex() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#ff0000".parse::<Color>().unwrap().to_rgb8(), (255, 0, 0));
        assert_eq!("#0f0".parse::<Color>().unwrap().to_rgb8(), (0, 255, 0));
        assert!("#12345".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color::from_rgb8(18, 52, 86).to_string(), "#123456");
    }
}
