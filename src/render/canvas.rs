//! CPU canvas target.

use crate::error::{Error, Result};
use crate::typography::Color;

/// An RGBA8 pixel buffer in row-major order, top-left origin.
///
/// The fields are public so callers can hand the pixels to other imaging
/// code directly; `pixels.len()` is always `width * height * 4`.
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Canvas {
    /// Creates an opaque canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&[fill.r, fill.g, fill.b, 255]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wraps a decoded background image as the canvas contents.
    pub fn from_background(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    /// Source-over blends `color` at `alpha` into the pixel at `(x, y)`.
    ///
    /// Coordinates outside the canvas are ignored, so callers can blit
    /// partially clipped glyphs without their own bounds checks.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let index = (y as usize * self.width as usize + x as usize) * 4;
        let src = [
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
        ];
        let dst_alpha = f32::from(self.pixels[index + 3]) / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        if out_alpha <= 0.0 {
            return;
        }

        for channel in 0..3 {
            let dst = f32::from(self.pixels[index + channel]) / 255.0;
            let out = (src[channel] * alpha + dst * dst_alpha * (1.0 - alpha)) / out_alpha;
            self.pixels[index + channel] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        self.pixels[index + 3] = (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    /// Reads back one pixel as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[index],
            self.pixels[index + 1],
            self.pixels[index + 2],
            self.pixels[index + 3],
        ])
    }

    /// Encodes the canvas as a PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        use image::ImageEncoder;

        let mut encoded = Vec::new();
        image::codecs::png::PngEncoder::new(&mut encoded)
            .write_image(
                &self.pixels,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|err| Error::generation("PNG_ENCODE_FAILED", err))?;
        Ok(encoded)
    }
}
