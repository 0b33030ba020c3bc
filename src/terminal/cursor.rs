//! Cursor hiding with guaranteed restore.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

/// Save cursor position (SCO) and hide it.
pub const HIDE_CURSOR: &str = "\x1b[s\x1b[?25l";
/// Restore cursor position (SCO) and show it.
pub const SHOW_CURSOR: &str = "\x1b[u\x1b[?25h";
/// Move the cursor to the top left corner.
pub const CURSOR_HOME: &str = "\x1b[H";

/// Guard that keeps the cursor hidden while it lives.
///
/// The guard owns the output writer for the duration of playback so all
/// frame output goes through it. Dropping the guard (normal return, `?`
/// error, interrupt or panic unwinding) resets colors, restores the cursor
/// position and makes the cursor visible again.
pub struct CursorGuard<W: Write> {
    out: W,
    hidden: bool,
}

impl<W: Write> CursorGuard<W> {
    /// Hide the cursor and return a guard that will show it on drop.
    pub fn hide(mut out: W) -> io::Result<Self> {
        out.write_all(HIDE_CURSOR.as_bytes())?;
        out.flush()?;
        Ok(Self { out, hidden: true })
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Move to the top left corner before drawing the next frame.
    pub fn home(&mut self) -> io::Result<()> {
        self.out.write_all(CURSOR_HOME.as_bytes())
    }

    /// Show the cursor now. After this, drop is a no-op.
    pub fn show(&mut self) -> io::Result<()> {
        if self.hidden {
            self.hidden = false;
            self.out.write_all(super::stream::RESET.as_bytes())?;
            self.out.write_all(SHOW_CURSOR.as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Show the cursor and hand back the writer.
    pub fn release(mut self) -> io::Result<W>
    where
        W: Default,
    {
        self.show()?;
        Ok(std::mem::take(&mut self.out))
    }
}

impl<W: Write> Deref for CursorGuard<W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> DerefMut for CursorGuard<W> {
    fn deref_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for CursorGuard<W> {
    fn drop(&mut self) {
        // Best-effort cleanup - ignore errors during drop
        let _ = self.show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_and_drop() {
        let mut out = Vec::new();
        {
            let guard = CursorGuard::hide(&mut out).unwrap();
            assert!(guard.is_hidden());
        }
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with(HIDE_CURSOR));
        assert!(s.ends_with(SHOW_CURSOR));
    }

    #[test]
    fn test_manual_show_then_drop_is_noop() {
        let mut out = Vec::new();
        {
            let mut guard = CursorGuard::hide(&mut out).unwrap();
            guard.show().unwrap();
            assert!(!guard.is_hidden());
        }
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.matches(SHOW_CURSOR).count(), 1);
    }

    #[test]
    fn test_restored_on_panic() {
        let mut out = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = CursorGuard::hide(&mut out).unwrap();
            guard.write_all(b"frame").unwrap();
            panic!("decoder blew up");
        }));
        assert!(result.is_err());
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("frame"));
        assert!(s.ends_with(SHOW_CURSOR));
    }

    #[test]
    fn test_release_returns_writer() {
        let guard = CursorGuard::hide(Vec::new()).unwrap();
        let out = guard.release().unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.ends_with(SHOW_CURSOR));
    }
}
