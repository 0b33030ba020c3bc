//! Terminal dimension detection.

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl Default for TermSize {
    fn default() -> Self {
        Self { cols: 80, rows: 24 }
    }
}

impl TermSize {
    /// Query the terminal attached to stdout.
    ///
    /// Falls back to `$COLUMNS` / `$LINES`, then to 80x24, when stdout is not
    /// a terminal or reports a zero size.
    pub fn detect() -> Self {
        match query_stdout() {
            Some(size) => size,
            None => {
                let size = Self::from_env(
                    std::env::var("COLUMNS").ok().as_deref(),
                    std::env::var("LINES").ok().as_deref(),
                );
                log::debug!("terminal size unavailable, using {}x{}", size.cols, size.rows);
                size
            }
        }
    }

    /// Accept a reported size only when both dimensions are set.
    fn nonzero(cols: u16, rows: u16) -> Option<Self> {
        (cols > 0 && rows > 0).then_some(Self { cols, rows })
    }

    fn from_env(columns: Option<&str>, lines: Option<&str>) -> Self {
        let default = Self::default();
        let parse = |v: Option<&str>, fallback: u16| {
            v.and_then(|s| s.trim().parse::<u16>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(fallback)
        };
        Self {
            cols: parse(columns, default.cols),
            rows: parse(lines, default.rows),
        }
    }
}

fn query_stdout() -> Option<TermSize> {
    let (cols, rows) = crossterm::terminal::size().ok()?;
    TermSize::nonzero(cols, rows)
}
