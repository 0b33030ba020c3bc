//! Two-pixels-per-cell encoding with half block glyphs.
//!
//! Each character cell shows a top and a bottom pixel. With the upper half
//! block `▀` the foreground paints the top half and the background the bottom
//! half; `▄` is the mirror image.

use crate::color::Color;
use crate::palette::PaletteMapper;

pub const UPPER_HALF_BLOCK: char = '\u{2580}';
pub const LOWER_HALF_BLOCK: char = '\u{2584}';
pub const FULL_BLOCK: char = '\u{2588}';

/// Glyph and color pair for one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub glyph: char,
    pub fg: u8,
    pub bg: u8,
}

impl CellStyle {
    /// Palette colors that end up on the (top, bottom) halves of the cell.
    pub fn rendered(&self, palette: &PaletteMapper) -> (Color, Color) {
        let fg = palette.color(self.fg);
        let bg = palette.color(self.bg);
        match self.glyph {
            UPPER_HALF_BLOCK => (fg, bg),
            LOWER_HALF_BLOCK => (bg, fg),
            FULL_BLOCK => (fg, fg),
            // any other glyph is blank and shows only the background
            _ => (bg, bg),
        }
    }

    /// Summed squared RGB error of the rendered cell against the true pixels.
    pub fn error(&self, palette: &PaletteMapper, top: Color, bottom: Color) -> f64 {
        let (shown_top, shown_bottom) = self.rendered(palette);
        shown_top.distance_sq(top) + shown_bottom.distance_sq(bottom)
    }
}

/// Strategy for choosing a cell's glyph and colors.
///
/// Both halves are mapped to their nearest palette entries independently, so
/// the upper half block is always an optimal cell. `Searching` therefore
/// produces the same colors as `Simple`; it differs only in that it
/// evaluates every glyph and would pick another on strictly lower error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DualPixelEncoder {
    /// Always the upper half block: fg = top, bg = bottom.
    #[default]
    Simple,
    /// Try every glyph and keep the one with the least error.
    Searching,
}

impl DualPixelEncoder {
    /// Encode one cell from its top and bottom pixels.
    ///
    /// Both pixels should already be opaque. `space` is the blank glyph used
    /// when a cell shows only its background.
    pub fn encode(
        &self,
        palette: &PaletteMapper,
        top: Color,
        bottom: Color,
        space: char,
    ) -> CellStyle {
        match self {
            DualPixelEncoder::Simple => CellStyle {
                glyph: UPPER_HALF_BLOCK,
                fg: palette.map(top),
                bg: palette.map(bottom),
            },
            DualPixelEncoder::Searching => search(palette, top, bottom, space),
        }
    }
}

/// Glyph candidates in tie-break order.
fn candidates(
    palette: &PaletteMapper,
    top: Color,
    bottom: Color,
    space: char,
) -> [CellStyle; 4] {
    let t = palette.map(top);
    let b = palette.map(bottom);
    [
        CellStyle { glyph: UPPER_HALF_BLOCK, fg: t, bg: b },
        CellStyle { glyph: LOWER_HALF_BLOCK, fg: b, bg: t },
        CellStyle { glyph: FULL_BLOCK, fg: t, bg: t },
        CellStyle { glyph: space, fg: t, bg: b },
    ]
}

fn search(palette: &PaletteMapper, top: Color, bottom: Color, space: char) -> CellStyle {
    let candidates = candidates(palette, top, bottom, space);
    let mut best = candidates[0];
    let mut best_err = best.error(palette, top, bottom);
    for cand in &candidates[1..] {
        let err = cand.error(palette, top, bottom);
        if err < best_err {
            best = *cand;
            best_err = err;
        }
    }
    log::trace!("dual-pixel {:?} err={:.5}", best, best_err);
    best
}
