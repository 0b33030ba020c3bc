//! Density ramps: glyphs ordered from visually sparse to visually dense.

use std::fmt;
use std::str::FromStr;

/// Block character ramp (5 levels), the default.
/// Starts with a non-breaking space so copy/paste keeps the columns.
pub const BLOCKS_CHARSET: &[char] = &['\u{a0}', '░', '▒', '▓', '█'];

/// Standard ASCII density ramp (10 levels).
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Minimal character set (4 levels).
/// Clean, less noisy look.
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', ':', '#'];

/// Built-in ramps selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Blocks,
    Standard,
    Minimal,
}

impl CharSet {
    pub const ALL: [CharSet; 3] = [CharSet::Blocks, CharSet::Standard, CharSet::Minimal];

    /// Look up a built-in ramp by its name.
    pub fn from_name(name: &str) -> Option<CharSet> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Blocks => "blocks",
            CharSet::Standard => "standard",
            CharSet::Minimal => "minimal",
        }
    }

    pub fn ramp(&self) -> DensityRamp {
        DensityRamp::new(self.chars().to_vec())
    }
}

/// An ordered, non-empty list of glyphs of increasing density.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityRamp {
    glyphs: Vec<char>,
}

impl Default for DensityRamp {
    fn default() -> Self {
        CharSet::default().ramp()
    }
}

impl DensityRamp {
    /// # Panics
    /// Panics if `glyphs` is empty.
    pub fn new(glyphs: Vec<char>) -> Self {
        assert!(!glyphs.is_empty(), "density ramp needs at least one glyph");
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true for a constructed ramp.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index]
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Sparsest glyph.
    pub fn first(&self) -> char {
        self.glyphs[0]
    }

    /// Densest glyph.
    pub fn last(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }
}

/// Error for an empty ramp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("density ramp must contain at least one character")]
pub struct EmptyRampError;

impl FromStr for DensityRamp {
    type Err = EmptyRampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let glyphs: Vec<char> = s.chars().collect();
        if glyphs.is_empty() {
            return Err(EmptyRampError);
        }
        Ok(DensityRamp::new(glyphs))
    }
}

impl fmt::Display for DensityRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.glyphs {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
