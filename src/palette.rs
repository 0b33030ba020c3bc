//! xterm 256-color palette and nearest-color lookup.
//!
//! Layout of the palette:
//! - 0-15: the ANSI system colors (xterm defaults)
//! - 16-231: 6x6x6 color cube
//! - 232-255: 24-step greyscale ramp
//!
//! Only the cube and greyscale entries take part in nearest-color search;
//! terminals re-theme the system colors.

use std::sync::OnceLock;

use crate::color::Color;

/// Channel levels of the 6x6x6 cube.
pub const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First palette index considered by [`PaletteMapper::map`].
pub const FIRST_SEARCHABLE: usize = 16;

#[rustfmt::skip]
const SYSTEM_COLORS: [(u8, u8, u8); 16] = [
    (0, 0, 0),       (128, 0, 0),     (0, 128, 0),     (128, 128, 0),
    (0, 0, 128),     (128, 0, 128),   (0, 128, 128),   (192, 192, 192),
    (128, 128, 128), (255, 0, 0),     (0, 255, 0),     (255, 255, 0),
    (0, 0, 255),     (255, 0, 255),   (0, 255, 255),   (255, 255, 255),
];

static SHARED: OnceLock<PaletteMapper> = OnceLock::new();

/// A palette slot and the color it displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub index: u8,
    pub color: Color,
}

/// Maps arbitrary colors onto the 256-color terminal palette.
#[derive(Debug, Clone)]
pub struct PaletteMapper {
    entries: Vec<PaletteEntry>,
}

impl Default for PaletteMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteMapper {
    /// Build the full 256-entry palette.
    pub fn new() -> Self {
        let mut rgb: Vec<(u8, u8, u8)> = SYSTEM_COLORS.to_vec();
        for &r in &CUBE_LEVELS {
            for &g in &CUBE_LEVELS {
                for &b in &CUBE_LEVELS {
                    rgb.push((r, g, b));
                }
            }
        }
        for i in 0..24u8 {
            let v = 8 + 10 * i;
            rgb.push((v, v, v));
        }
        debug_assert_eq!(rgb.len(), 256);

        let entries = rgb
            .into_iter()
            .enumerate()
            .map(|(i, (r, g, b))| PaletteEntry {
                index: i as u8,
                color: Color::from_rgb8(r, g, b),
            })
            .collect();
        Self { entries }
    }

    /// Process-wide palette, built on first use.
    pub fn shared() -> &'static PaletteMapper {
        SHARED.get_or_init(PaletteMapper::new)
    }

    /// Entry for a palette index.
    pub fn entry(&self, index: u8) -> PaletteEntry {
        self.entries[index as usize]
    }

    /// Color displayed for a palette index.
    pub fn color(&self, index: u8) -> Color {
        self.entries[index as usize].color
    }

    /// All 256 entries in index order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Index of the cube/greyscale entry closest to `color` in RGB space.
    ///
    /// Alpha is ignored; composite first with [`Color::opacify`]. Ties go to
    /// the lowest index.
    pub fn map(&self, color: Color) -> u8 {
        let mut best = FIRST_SEARCHABLE;
        let mut best_dist = f64::INFINITY;
        for entry in &self.entries[FIRST_SEARCHABLE..] {
            let dist = entry.color.distance_sq(color);
            if dist < best_dist {
                best_dist = dist;
                best = entry.index as usize;
            }
        }
        best as u8
    }

    /// Round-trip a color through the palette.
    pub fn quantize(&self, color: Color) -> Color {
        self.color(self.map(color))
    }
}
