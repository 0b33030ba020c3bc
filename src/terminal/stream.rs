//! Escape-sequence writer that only emits color changes.

use std::io::{self, Write};

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
/// Switch back to the terminal's own background.
pub const DEFAULT_BACKGROUND: &str = "\x1b[49m";

/// Tracks the colors last sent to the terminal so unchanged colors are not
/// re-sent for every cell.
///
/// `None` means the terminal is in its default state for that property. A
/// stream dropped while still holding a color writes a reset so the terminal
/// is never left colored.
pub struct TerminalStream<'a, W: Write> {
    out: &'a mut W,
    fg: Option<u8>,
    bg: Option<u8>,
}

impl<'a, W: Write> TerminalStream<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            fg: None,
            bg: None,
        }
    }

    pub fn foreground(&self) -> Option<u8> {
        self.fg
    }

    pub fn background(&self) -> Option<u8> {
        self.bg
    }

    /// Select a 256-color foreground (`ESC[38;5;Nm`) if it changed.
    pub fn set_foreground(&mut self, index: u8) -> io::Result<()> {
        if self.fg != Some(index) {
            write!(self.out, "\x1b[38;5;{}m", index)?;
            self.fg = Some(index);
        }
        Ok(())
    }

    /// Select a 256-color background (`ESC[48;5;Nm`) if it changed.
    pub fn set_background(&mut self, index: u8) -> io::Result<()> {
        if self.bg != Some(index) {
            write!(self.out, "\x1b[48;5;{}m", index)?;
            self.bg = Some(index);
        }
        Ok(())
    }

    /// Return to the terminal's default background if a color is set.
    pub fn use_default_background(&mut self) -> io::Result<()> {
        if self.bg.is_some() {
            self.out.write_all(DEFAULT_BACKGROUND.as_bytes())?;
            self.bg = None;
        }
        Ok(())
    }

    /// Write a glyph as-is.
    pub fn write_glyph(&mut self, glyph: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(glyph.encode_utf8(&mut buf).as_bytes())
    }

    /// Write a reset and forget the current colors.
    pub fn reset(&mut self) -> io::Result<()> {
        self.out.write_all(RESET.as_bytes())?;
        self.fg = None;
        self.bg = None;
        Ok(())
    }

    /// Finish a row: reset, then newline.
    pub fn end_row(&mut self) -> io::Result<()> {
        self.reset()?;
        self.out.write_all(b"\n")
    }

    /// Write raw bytes (cursor control and the like) without touching state.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalStream<'_, W> {
    fn drop(&mut self) {
        if self.fg.is_some() || self.bg.is_some() {
            // Best-effort cleanup - ignore errors during drop
            let _ = self.reset();
            let _ = self.out.flush();
        }
    }
}
