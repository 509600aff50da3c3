//! The render target and its PNG sink.
//!
//! The buffer stores unclamped colors; clamping and quantization to 8-bit
//! channels happen only on the way out, so render output keeps its full
//! dynamic range until the moment it is encoded.

use std::path::Path;

use glint_math::Color;
use image::{ImageFormat, Rgb, RgbImage};

/// A `width × height` grid of unclamped pixel colors.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    /// Horizontal resolution.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Vertical resolution.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The color at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Store `color` in the pixel's slot.
    pub fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Overlay grid lines every `interval` pixels.
    pub fn print_grid(&mut self, interval: u32, color: Color) {
        for y in 0..self.height {
            for x in 0..self.width {
                if x % interval == 0 || y % interval == 0 {
                    self.write_pixel(x, y, color);
                }
            }
        }
    }

    /// Quantize to packed 8-bit RGB rows.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&quantize(*color));
        }
        bytes
    }

    /// Encode the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let mut img = RgbImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb(quantize(self.get(x, y)));
        }
        img.save_with_format(path, ImageFormat::Png)
    }
}

/// Clamp a channel to the displayable 0..=255 range and truncate.
fn quantize(color: Color) -> [u8; 3] {
    [
        color.r.min(255.0) as u8,
        color.g.min(255.0) as u8,
        color.b.min(255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_black() {
        let buffer = ImageBuffer::new(4, 3);
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.get(3, 2), Color::BLACK);
    }

    #[test]
    fn test_write_and_get() {
        let mut buffer = ImageBuffer::new(4, 3);
        buffer.write_pixel(2, 1, Color::new(10.0, 20.0, 30.0));
        assert_eq!(buffer.get(2, 1), Color::new(10.0, 20.0, 30.0));
        assert_eq!(buffer.get(1, 2), Color::BLACK);
    }

    #[test]
    fn test_quantize_clamps_but_keeps_range() {
        assert_eq!(quantize(Color::new(300.0, 255.0, 0.0)), [255, 255, 0]);
        assert_eq!(quantize(Color::new(12.7, 99.9, 1.0)), [12, 99, 1]);
    }

    #[test]
    fn test_to_rgb8_layout() {
        let mut buffer = ImageBuffer::new(2, 1);
        buffer.write_pixel(0, 0, Color::new(1.0, 2.0, 3.0));
        buffer.write_pixel(1, 0, Color::new(400.0, 5.0, 6.0));
        assert_eq!(buffer.to_rgb8(), vec![1, 2, 3, 255, 5, 6]);
    }

    #[test]
    fn test_print_grid() {
        let mut buffer = ImageBuffer::new(5, 5);
        buffer.print_grid(2, Color::new(255.0, 0.0, 0.0));
        assert_eq!(buffer.get(0, 1), Color::new(255.0, 0.0, 0.0));
        assert_eq!(buffer.get(2, 3), Color::new(255.0, 0.0, 0.0));
        assert_eq!(buffer.get(1, 1), Color::BLACK);
        assert_eq!(buffer.get(3, 3), Color::BLACK);
    }
}
