//! Pixel buffers and the image operations applied before quantization.
//!
//! A [`PixelBuffer`] is produced by a decoder (see [`crate::decode`]) or a
//! synthetic generator such as [`generate_spectrum`], resampled to the output
//! size and optionally equalized.

mod equalize;
mod resample;
mod spectrum;

pub use spectrum::generate_spectrum;

use crate::color::Color;

/// Dense row-major grid of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer filled with opaque black.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// Create a buffer where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap existing pixel data.
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixel count does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a buffer from packed RGB bytes (3 bytes per pixel).
    pub fn from_rgb8(width: usize, height: usize, data: &[u8]) -> Self {
        let pixels = data
            .chunks_exact(3)
            .map(|px| Color::from_rgb8(px[0], px[1], px[2]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Build a buffer from packed RGBA bytes (4 bytes per pixel).
    pub fn from_rgba8(width: usize, height: usize, data: &[u8]) -> Self {
        let pixels = data
            .chunks_exact(4)
            .map(|px| Color::from_rgba8(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // chunks() rejects a zero chunk size, so a zero-width buffer yields nothing.
        self.pixels.chunks(self.width.max(1)).take(self.height)
    }

    /// Read the pixel at (x, y).
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite the pixel at (x, y).
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the buffer.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.pixels().len(), 6);
        assert!(buf.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_get_set() {
        let mut buf = PixelBuffer::new(2, 2);
        let red = Color::rgb(1.0, 0.0, 0.0);
        buf.set(1, 0, red);
        assert_eq!(buf.get(1, 0), red);
        assert_eq!(buf.get(0, 1), Color::BLACK);
        assert_eq!(buf.pixels()[1], red);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let buf = PixelBuffer::new(2, 2);
        buf.get(2, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(0, 5, Color::WHITE);
    }

    #[test]
    #[should_panic(expected = "pixel count")]
    fn test_from_pixels_length_mismatch_panics() {
        PixelBuffer::from_pixels(2, 2, vec![Color::BLACK; 3]);
    }

    #[test]
    fn test_from_rgba8() {
        let buf = PixelBuffer::from_rgba8(2, 1, &[255, 0, 0, 255, 0, 0, 255, 0]);
        assert_eq!(buf.get(0, 0).to_rgb8(), (255, 0, 0));
        assert_eq!(buf.get(1, 0).a, 0.0);
    }

    #[test]
    fn test_rows() {
        let buf = PixelBuffer::from_rgb8(2, 2, &[0, 0, 0, 10, 10, 10, 20, 20, 20, 30, 30, 30]);
        let rows: Vec<&[Color]> = buf.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1].to_rgb8(), (30, 30, 30));
    }

    #[test]
    fn test_rows_zero_width() {
        let buf = PixelBuffer::new(0, 3);
        assert_eq!(buf.rows().count(), 0);
    }
}
