/// RGBA canvas with source-over blending and PNG encoding.
pub mod canvas;
/// Glyph drawing: shadow pass, fill pass, pen advance bookkeeping.
pub mod compositor;
/// Cache of rasterized glyph coverage bitmaps.
pub mod raster_cache;

pub use canvas::Canvas;
pub use compositor::Compositor;
pub use raster_cache::{GlyphRasterCache, RasterKey};
