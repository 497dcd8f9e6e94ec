//! Text compositing.
//!
//! Walks positioned lines token by token and blends each glyph onto the
//! canvas twice: a blurred black shadow first, then the style's fill color.
//! Pen advances reuse the same width table the layout was computed with,
//! so painted text occupies exactly the measured line extents.

use crate::font_provider::TypographyFonts;
use crate::glyph_width::WidthTable;
use crate::render::canvas::Canvas;
use crate::render::raster_cache::{GlyphRasterCache, RasterKey};
use crate::text::layout::LayoutResult;
use crate::text::token::Token;
use crate::typography::{Color, FontStyle, LayoutConfig};

/// Box blur radius of the glyph drop shadow, in pixels.
const SHADOW_RADIUS: usize = 2;
const SHADOW_ALPHA: f32 = 0.3;
const SHADOW_COLOR: Color = Color::new(0, 0, 0);

/// Draws laid-out text, caching glyph rasterizations across calls.
pub struct Compositor {
    cache: GlyphRasterCache,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            cache: GlyphRasterCache::new(),
        }
    }

    pub fn cache(&self) -> &GlyphRasterCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Draws every positioned line of `layout` onto `canvas`.
    pub fn draw_quote(
        &mut self,
        canvas: &mut Canvas,
        layout: &LayoutResult,
        widths: &WidthTable,
        fonts: &TypographyFonts,
        config: &LayoutConfig,
    ) {
        for positioned in &layout.lines {
            let mut pen_x = positioned.origin.x;
            let middle_y = positioned.origin.y;

            for (index, token) in positioned.line.tokens.iter().enumerate() {
                if index > 0 {
                    pen_x += widths.space_width();
                }
                pen_x = self.draw_token(canvas, token, pen_x, middle_y, widths, fonts, config);
            }
        }
    }

    /// Draws one token starting at `start_x` and returns the pen position
    /// after it.
    fn draw_token(
        &mut self,
        canvas: &mut Canvas,
        token: &Token,
        start_x: f32,
        middle_y: f32,
        widths: &WidthTable,
        fonts: &TypographyFonts,
        config: &LayoutConfig,
    ) -> f32 {
        let style = FontStyle::from_bold(token.bold);
        let style_fonts = fonts.style(style);
        let paint = config.style(style);
        // Line origins carry the vertical middle of the row; glyph placement
        // needs the baseline.
        let baseline_y = middle_y + style_fonts.middle_to_baseline();

        let mut pen_x = start_x;
        for ch in token.text.chars() {
            let (slot, glyph_index, font) = style_fonts.glyph(ch);
            let key = RasterKey::new(style, slot, glyph_index, style_fonts.px());
            let glyph = self.cache.get_or_rasterize(key, font);

            if glyph.metrics.width > 0 && glyph.metrics.height > 0 {
                let left = pen_x + glyph.metrics.xmin as f32;
                let top = baseline_y - glyph.metrics.ymin as f32 - glyph.metrics.height as f32;

                let (shadow, shadow_width, shadow_height) = blur_coverage(
                    &glyph.coverage,
                    glyph.metrics.width,
                    glyph.metrics.height,
                    SHADOW_RADIUS,
                );
                blend_coverage(
                    canvas,
                    left - SHADOW_RADIUS as f32,
                    top - SHADOW_RADIUS as f32,
                    &shadow,
                    shadow_width,
                    shadow_height,
                    SHADOW_COLOR,
                    SHADOW_ALPHA,
                );
                blend_coverage(
                    canvas,
                    left,
                    top,
                    &glyph.coverage,
                    glyph.metrics.width,
                    glyph.metrics.height,
                    paint.color,
                    paint.opacity,
                );
            }

            pen_x += widths.width_of(style, ch);
        }

        pen_x
    }
}

/// Blends an 8-bit coverage bitmap onto the canvas at `(left, top)`.
fn blend_coverage(
    canvas: &mut Canvas,
    left: f32,
    top: f32,
    coverage: &[u8],
    width: usize,
    height: usize,
    color: Color,
    opacity: f32,
) {
    for row in 0..height {
        let y = (top + row as f32).floor() as i64;
        for col in 0..width {
            let value = coverage[row * width + col];
            if value == 0 {
                continue;
            }
            let x = (left + col as f32).floor() as i64;
            canvas.blend_pixel(x, y, color, opacity * f32::from(value) / 255.0);
        }
    }
}

/// Box-blurs a coverage bitmap, growing it by `radius` on every side.
///
/// Returns the blurred bitmap with its dimensions.
fn blur_coverage(
    coverage: &[u8],
    width: usize,
    height: usize,
    radius: usize,
) -> (Vec<u8>, usize, usize) {
    let out_width = width + 2 * radius;
    let out_height = height + 2 * radius;
    let window = 2 * radius + 1;
    let normalize = (window * window) as u32;
    let mut out = vec![0u8; out_width * out_height];

    for out_y in 0..out_height {
        for out_x in 0..out_width {
            let mut sum = 0u32;
            for window_y in 0..window {
                let src_y = out_y as isize + window_y as isize - 2 * radius as isize;
                if src_y < 0 || src_y >= height as isize {
                    continue;
                }
                for window_x in 0..window {
                    let src_x = out_x as isize + window_x as isize - 2 * radius as isize;
                    if src_x < 0 || src_x >= width as isize {
                        continue;
                    }
                    sum += u32::from(coverage[src_y as usize * width + src_x as usize]);
                }
            }
            out[out_y * out_width + out_x] = (sum / normalize) as u8;
        }
    }

    (out, out_width, out_height)
}
