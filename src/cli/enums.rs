//! CLI enum types for render mode and character set options.

use clap::ValueEnum;

use crate::ascii;
use crate::renderer::RenderMode;

/// Output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Colored cells, one pixel each
    #[default]
    #[value(alias = "xterm256")]
    Color,
    /// Half blocks, two pixels per cell
    #[value(alias = "xterm256unicode")]
    DualPixelSimple,
    /// Best-fitting block glyph per cell
    #[value(alias = "macterm")]
    DualPixelSearching,
    /// Density ramp characters without color
    #[value(alias = "nocolor")]
    Monochrome,
}

impl From<Mode> for RenderMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Color => RenderMode::Color,
            Mode::DualPixelSimple => RenderMode::DualPixelSimple,
            Mode::DualPixelSearching => RenderMode::DualPixelSearching,
            Mode::Monochrome => RenderMode::Monochrome,
        }
    }
}

/// ASCII character set for monochrome rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Blocks,
    Standard,
    Minimal,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Standard => ascii::CharSet::Standard,
            CharacterSet::Minimal => ascii::CharSet::Minimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_to_render_mode() {
        assert_eq!(RenderMode::from(Mode::Color), RenderMode::Color);
        assert_eq!(
            RenderMode::from(Mode::DualPixelSimple),
            RenderMode::DualPixelSimple
        );
        assert_eq!(
            RenderMode::from(Mode::DualPixelSearching),
            RenderMode::DualPixelSearching
        );
        assert_eq!(RenderMode::from(Mode::Monochrome), RenderMode::Monochrome);
    }

    #[test]
    fn test_mode_names_match_config_names() {
        for mode in Mode::value_variants() {
            let name = mode.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(RenderMode::from(*mode).name(), name);
        }
    }

    #[test]
    fn test_charset_to_ascii_charset() {
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Standard),
            ascii::CharSet::Standard
        );
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Blocks),
            ascii::CharSet::Blocks
        );
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Minimal),
            ascii::CharSet::Minimal
        );
    }
}
