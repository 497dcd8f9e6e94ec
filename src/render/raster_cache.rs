//! Rasterized glyph cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::typography::FontStyle;

/// Font sizes are quantized to this many steps per pixel when used in
/// cache keys.
pub const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Identity of one rasterized glyph bitmap.
///
/// Glyphs are keyed by their slot in the resolved style chain rather than
/// a font database ID, so keys stay stable for the lifetime of a resolved
/// typography without referencing the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RasterKey {
    style: FontStyle,
    chain_slot: usize,
    glyph_index: u16,
    font_size: u32,
}

impl RasterKey {
    pub fn new(style: FontStyle, chain_slot: usize, glyph_index: u16, font_size: f32) -> Self {
        Self {
            style,
            chain_slot,
            glyph_index,
            font_size: (font_size * SUB_PIXEL_QUANTIZE).round() as u32,
        }
    }

    pub fn glyph_index(&self) -> u16 {
        self.glyph_index
    }

    pub fn font_size(&self) -> f32 {
        self.font_size as f32 / SUB_PIXEL_QUANTIZE
    }
}

/// One rasterized glyph: its metrics and 8-bit coverage bitmap.
pub struct RasterGlyph {
    pub metrics: fontdue::Metrics,
    pub coverage: Vec<u8>,
}

/// Keeps every glyph rasterized so far.
///
/// The working set of a card is bounded by the character set of its text,
/// so entries are never evicted.
pub struct GlyphRasterCache {
    glyphs: HashMap<RasterKey, Arc<RasterGlyph>, fxhash::FxBuildHasher>,
}

impl Default for GlyphRasterCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterCache {
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }

    /// Returns the cached bitmap for `key`, rasterizing it through `font`
    /// on first use.
    pub fn get_or_rasterize(&mut self, key: RasterKey, font: &fontdue::Font) -> Arc<RasterGlyph> {
        use std::collections::hash_map::Entry;

        match self.glyphs.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let (metrics, coverage) = font.rasterize_indexed(key.glyph_index, key.font_size());
                Arc::clone(entry.insert(Arc::new(RasterGlyph { metrics, coverage })))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_quantize_the_font_size() {
        let a = RasterKey::new(FontStyle::Regular, 0, 42, 42.0);
        let b = RasterKey::new(FontStyle::Regular, 0, 42, 42.001);
        let c = RasterKey::new(FontStyle::Regular, 0, 42, 42.5);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.font_size(), 42.0);
        assert_eq!(c.font_size(), 42.5);
    }

    #[test]
    fn keys_separate_styles_and_chain_slots() {
        let base = RasterKey::new(FontStyle::Regular, 0, 7, 42.0);

        assert_ne!(base, RasterKey::new(FontStyle::Bold, 0, 7, 42.0));
        assert_ne!(base, RasterKey::new(FontStyle::Regular, 1, 7, 42.0));
        assert_ne!(base, RasterKey::new(FontStyle::Regular, 0, 8, 42.0));
    }

    #[test]
    fn fresh_cache_is_empty() {
        let mut cache = GlyphRasterCache::new();

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        cache.clear();
        assert!(cache.is_empty());
    }
}
