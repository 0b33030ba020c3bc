//! Terminal plumbing - escape-code stream, cursor guard and size detection.

mod cursor;
mod size;
mod stream;

pub use cursor::{CursorGuard, CURSOR_HOME, HIDE_CURSOR, SHOW_CURSOR};
pub use size::TermSize;
pub use stream::{TerminalStream, DEFAULT_BACKGROUND, RESET};
