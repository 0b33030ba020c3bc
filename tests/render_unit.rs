//! Unit tests for the building blocks of the renderer.
//!
//! These tests check properties that hold across the pixel pipeline:
//! - Resampling stays inside the color hull of its input
//! - Palette mapping is stable and nearest
//! - Dual-pixel cells show the nearest palette color in each half
//! - Brightness quantization is monotonic and honors polarity
//! - The escape stream only emits on change

use hiptext::ascii::{CharSet, DensityRamp, GreyscaleQuantizer, Polarity, DEFAULT_LEVELS};
use hiptext::color::Color;
use hiptext::dualpixel::{DualPixelEncoder, UPPER_HALF_BLOCK};
use hiptext::graphic::PixelBuffer;
use hiptext::palette::PaletteMapper;
use hiptext::terminal::TerminalStream;

fn gradient(width: usize, height: usize) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = x as f64 / (width - 1).max(1) as f64;
            let g = y as f64 / (height - 1).max(1) as f64;
            buf.set(x, y, Color::rgb(r, g, 0.5));
        }
    }
    buf
}

/// A small grid of colors covering the cube corners and some mid tones.
fn sample_colors() -> Vec<Color> {
    let steps = [0.0, 0.3, 0.55, 0.8, 1.0];
    let mut colors = Vec::new();
    for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                colors.push(Color::rgb(r, g, b));
            }
        }
    }
    colors
}

// ==================== Resample Tests ====================

#[test]
fn test_resample_stays_in_hull() {
    let src = gradient(17, 9);
    for (w, h) in [(1, 1), (5, 3), (40, 20), (17, 9)] {
        let out = src.resample(w, h);
        assert_eq!((out.width(), out.height()), (w, h));
        for px in out.pixels() {
            assert!((0.0..=1.0).contains(&px.r));
            assert!((0.0..=1.0).contains(&px.g));
            assert!((px.b - 0.5).abs() < 1e-9);
        }
    }
}

#[test]
fn test_resample_uniform_is_uniform() {
    let teal = Color::rgb(0.0, 0.5, 0.5);
    let out = PixelBuffer::filled(7, 3, teal).resample(20, 11);
    assert!(out.pixels().iter().all(|&px| px.distance_sq(teal) < 1e-12));
}

// ==================== Palette Tests ====================

#[test]
fn test_palette_shared_instance() {
    let a = PaletteMapper::shared();
    let b = PaletteMapper::shared();
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.entries().len(), 256);
}

#[test]
fn test_palette_map_is_nearest_searchable_entry() {
    let palette = PaletteMapper::shared();
    for color in sample_colors() {
        let code = palette.map(color);
        assert!(code >= 16);
        let best = color.distance_sq(palette.color(code));
        for index in 16..=255u8 {
            assert!(best <= color.distance_sq(palette.color(index)) + 1e-12);
        }
    }
}

#[test]
fn test_palette_quantize_is_idempotent() {
    let palette = PaletteMapper::shared();
    for color in sample_colors() {
        let once = palette.quantize(color);
        assert_eq!(palette.quantize(once), once);
    }
}

// ==================== Dual Pixel Tests ====================

#[test]
fn test_searching_picks_nearest_halves() {
    let palette = PaletteMapper::shared();
    let top = Color::from_rgb8(250, 140, 10);
    let bottom = Color::from_rgb8(20, 20, 110);
    let cell = DualPixelEncoder::Searching.encode(palette, top, bottom, '\u{a0}');
    assert_eq!(cell.glyph, UPPER_HALF_BLOCK);
    assert_eq!((cell.fg, cell.bg), (palette.map(top), palette.map(bottom)));
    let (shown_top, shown_bottom) = cell.rendered(palette);
    assert_eq!(shown_top, palette.quantize(top));
    assert_eq!(shown_bottom, palette.quantize(bottom));
}

#[test]
fn test_searching_matches_simple_colors() {
    let palette = PaletteMapper::shared();
    let colors = sample_colors();
    for (i, &top) in colors.iter().enumerate().step_by(7) {
        for &bottom in colors.iter().skip(i % 5).step_by(11) {
            let simple = DualPixelEncoder::Simple.encode(palette, top, bottom, ' ');
            let search = DualPixelEncoder::Searching.encode(palette, top, bottom, ' ');
            assert_eq!(
                simple.rendered(palette),
                search.rendered(palette),
                "{} / {}",
                top,
                bottom
            );
        }
    }
}

#[test]
fn test_encoders_agree_on_uniform_cells() {
    let palette = PaletteMapper::shared();
    for color in sample_colors() {
        let simple = DualPixelEncoder::Simple.encode(palette, color, color, ' ');
        let search = DualPixelEncoder::Searching.encode(palette, color, color, ' ');
        assert_eq!(simple.rendered(palette), search.rendered(palette));
    }
}

// ==================== Quantizer Tests ====================

#[test]
fn test_quantizer_is_monotonic() {
    let ramp = CharSet::Standard.ramp();
    let quantizer = GreyscaleQuantizer::new(ramp.clone(), DEFAULT_LEVELS, Polarity::DarkBackground);
    let position = |c: char| ramp.glyphs().iter().position(|&g| g == c).unwrap();

    let mut last = 0;
    for v in 0..=255u8 {
        let idx = position(quantizer.quantize(v));
        assert!(idx >= last, "ramp went backwards at {}", v);
        last = idx;
    }
    assert_eq!(quantizer.quantize(0), ramp.first());
    assert_eq!(quantizer.quantize(255), ramp.last());
}

#[test]
fn test_quantizer_light_background_inverts() {
    let ramp: DensityRamp = " .:#".parse().unwrap();
    let dark = GreyscaleQuantizer::new(ramp.clone(), DEFAULT_LEVELS, Polarity::DarkBackground);
    let light = GreyscaleQuantizer::new(ramp, DEFAULT_LEVELS, Polarity::LightBackground);
    for v in 0..=255u8 {
        assert_eq!(light.quantize(v), dark.quantize(255 - v));
    }
}

#[test]
fn test_polarity_from_background() {
    assert_eq!(Polarity::for_background(Color::BLACK), Polarity::DarkBackground);
    assert_eq!(Polarity::for_background(Color::WHITE), Polarity::LightBackground);
    assert_eq!(
        Polarity::for_background("navy".parse().unwrap()),
        Polarity::DarkBackground
    );
}

// ==================== Terminal Stream Tests ====================

#[test]
fn test_stream_emits_only_on_change() {
    let mut out = Vec::new();
    {
        let mut stream = TerminalStream::new(&mut out);
        for glyph in ['a', 'b', 'c'] {
            stream.set_background(21).unwrap();
            stream.write_glyph(glyph).unwrap();
        }
        stream.set_background(196).unwrap();
        stream.write_glyph('d').unwrap();
        stream.end_row().unwrap();
    }
    let s = String::from_utf8(out).unwrap();
    assert_eq!(s, "\x1b[48;5;21mabc\x1b[48;5;196md\x1b[0m\n");
}

#[test]
fn test_stream_state_forgotten_after_row() {
    let mut out = Vec::new();
    {
        let mut stream = TerminalStream::new(&mut out);
        stream.set_foreground(46).unwrap();
        stream.write_glyph('x').unwrap();
        stream.end_row().unwrap();
        assert_eq!(stream.foreground(), None);
        stream.set_foreground(46).unwrap();
        stream.write_glyph('y').unwrap();
        stream.end_row().unwrap();
    }
    let s = String::from_utf8(out).unwrap();
    assert_eq!(s.matches("\x1b[38;5;46m").count(), 2);
}
