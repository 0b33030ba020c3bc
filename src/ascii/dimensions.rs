//! Output size calculation.
//!
//! Sizes here are in "square pixels": a width of `w` columns and a height of
//! `h` means the image would look right if every terminal cell were square.
//! Since cells are about twice as tall as they are wide, the renderer then
//! spends one cell row per two pixel rows.

/// Resolve the output width and height.
///
/// * width - the requested width capped at the terminal width, or the
///   terminal width when none was requested.
/// * height - the requested height, or the height that keeps the source
///   aspect ratio at that width (truncated).
///
/// # Example
/// ```ignore
/// // A 640x480 image on an 80 column terminal
/// assert_eq!(output_size(640, 480, 80, None, None), (80, 60));
/// ```
pub fn output_size(
    img_width: usize,
    img_height: usize,
    term_cols: usize,
    width: Option<usize>,
    height: Option<usize>,
) -> (usize, usize) {
    let width = match width {
        Some(w) if w > 0 => w.min(term_cols),
        _ => term_cols,
    };
    let height = match height {
        Some(h) if h > 0 => h,
        _ => aspect_height(width, img_width, img_height),
    };
    (width, height)
}

/// Height that keeps `img_width:img_height` at `new_width`.
pub fn aspect_height(new_width: usize, img_width: usize, img_height: usize) -> usize {
    if img_width == 0 {
        return 0;
    }
    (new_width as f64 / img_width as f64 * img_height as f64) as usize
}
