//! Greyscale (monochrome) rendering support.
//!
//! - [`DensityRamp`] / [`CharSet`] - glyph ramps ordered sparse to dense
//! - [`GreyscaleQuantizer`] - brightness to glyph
//! - [`output_size`] - target dimensions from the terminal and source size

mod charset;
mod dimensions;
mod mapping;

pub use charset::{
    CharSet, DensityRamp, EmptyRampError, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET,
};
pub use dimensions::{aspect_height, output_size};
pub use mapping::{GreyscaleQuantizer, Polarity, DEFAULT_LEVELS};
