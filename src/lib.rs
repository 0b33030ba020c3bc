//! hiptext library crate.
//!
//! Renders pixel buffers as colored terminal text. The binary wires these
//! pieces to the command line; integration tests use them directly.

pub mod ascii;
pub mod cli;
pub mod color;
pub mod config;
pub mod decode;
pub mod dualpixel;
pub mod graphic;
pub mod movie;
pub mod palette;
pub mod renderer;
pub mod terminal;
