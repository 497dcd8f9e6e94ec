//! Font registration and resolution.
//!
//! [`FontProvider`] wraps a [`fontdb::Database`] for discovery and lazily
//! parses faces into [`fontdue::Font`]s for measurement and rasterization.
//! Resolving a [`TypographyStyle`] walks its family chain and produces a
//! [`StyleFonts`] handle that keeps the parsed fonts alive independently of
//! the provider.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::glyph_width::CharMetrics;
use crate::typography::{FontStyle, LayoutConfig, TypographyStyle};

/// Registered font faces plus the fonts already parsed from them.
pub struct FontProvider {
    font_db: fontdb::Database,
    parsed: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider {
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            parsed: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }

    /// Registers a font from its raw binary data.
    ///
    /// The data may be a single font or a collection.
    pub fn register_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Registers a font file.
    pub fn register_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.font_db
            .load_font_file(&path)
            .map_err(|err| Error::font(path.display().to_string(), err.to_string()))
    }

    /// Registers every font found under `dir`, recursively.
    ///
    /// Unreadable entries are skipped.
    pub fn register_dir(&mut self, dir: impl Into<PathBuf>) {
        self.font_db.load_fonts_dir(dir.into());
    }

    /// Registers all fonts installed on the system.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Sets the family resolved for the generic `serif` fallback.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family.into());
    }

    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Number of registered font faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Resolves `style` to an ordered chain of parsed fonts.
    ///
    /// The chain is queried family by family: the primary family first, then
    /// each declared fallback, then the generic serif family. Families that
    /// resolve to a face already in the chain are skipped. When nothing in
    /// the chain matches, the first registered face is pressed into service
    /// so text still renders as long as any font is available; only an
    /// empty or unparsable database is an error.
    pub fn resolve(&mut self, style: &TypographyStyle) -> Result<StyleFonts> {
        let mut families = Vec::with_capacity(style.fallbacks.len() + 2);
        families.push(fontdb::Family::Name(&style.family));
        for fallback in &style.fallbacks {
            families.push(fontdb::Family::Name(fallback));
        }
        families.push(fontdb::Family::Serif);

        let mut ids = Vec::new();
        let mut fonts = Vec::new();
        let mut primary_found = false;

        for (position, family) in families.iter().enumerate() {
            let query = fontdb::Query {
                families: std::slice::from_ref(family),
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            let Some(id) = self.font_db.query(&query) else {
                continue;
            };
            if ids.contains(&id) {
                continue;
            }
            if let Some(font) = self.font(id) {
                if position == 0 {
                    primary_found = true;
                }
                ids.push(id);
                fonts.push(font);
            }
        }

        if !primary_found {
            log::warn!("font family '{}' not found, relying on fallbacks", style.family);
        }

        if fonts.is_empty() {
            let first_face = self.font_db.faces().map(|face| face.id).next();
            if let Some(id) = first_face {
                log::warn!(
                    "no face matches the family chain of '{}', using the first registered face",
                    style.family
                );
                if let Some(font) = self.font(id) {
                    fonts.push(font);
                }
            }
        }

        if fonts.is_empty() {
            return Err(Error::font(
                style.family.clone(),
                "no usable font face is registered",
            ));
        }

        log::debug!("resolved '{}' to a chain of {} font(s)", style.family, fonts.len());

        Ok(StyleFonts {
            fonts,
            px: style.size,
        })
    }

    /// Returns the parsed font for a face, parsing and caching it on first
    /// use. Returns `None` if the face data cannot be parsed.
    fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.parsed.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let parse_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match parse_result {
                    Ok(font) => {
                        let font = entry.insert(Arc::new(font));
                        Some(Arc::clone(font))
                    }
                    Err(err) => {
                        log::error!("failed to parse font face (id: {:?}): {}", id, err);
                        None
                    }
                }
            }
        }
    }
}

/// The resolved font chain for one typography style, at its pixel size.
///
/// The chain always holds at least one font.
#[derive(Clone, Debug)]
pub struct StyleFonts {
    fonts: Vec<Arc<fontdue::Font>>,
    px: f32,
}

impl StyleFonts {
    /// Pixel size the style renders at.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Locates `ch` in the chain.
    ///
    /// Returns the chain slot, glyph index, and font of the first chain
    /// entry with a real glyph for `ch`. Characters missing from every
    /// chain font map to the primary font's notdef glyph.
    pub fn glyph(&self, ch: char) -> (usize, u16, &Arc<fontdue::Font>) {
        for (slot, font) in self.fonts.iter().enumerate() {
            let index = font.lookup_glyph_index(ch);
            if index != 0 {
                return (slot, index, font);
            }
        }
        (0, 0, &self.fonts[0])
    }

    /// Horizontal advance of `ch` at the style's pixel size.
    pub fn char_width(&self, ch: char) -> f32 {
        let (_, index, font) = self.glyph(ch);
        font.metrics_indexed(index, self.px).advance_width
    }

    /// Line metrics of the primary chain font.
    pub fn line_metrics(&self) -> Option<fontdue::LineMetrics> {
        self.fonts[0].horizontal_line_metrics(self.px)
    }

    /// Offset from the vertical middle of the em box down to the baseline.
    pub fn middle_to_baseline(&self) -> f32 {
        self.line_metrics()
            .map(|metrics| (metrics.ascent + metrics.descent) / 2.0)
            .unwrap_or(0.0)
    }
}

/// Resolved fonts for both typography styles of a layout.
#[derive(Clone)]
pub struct TypographyFonts {
    regular: StyleFonts,
    bold: StyleFonts,
}

impl TypographyFonts {
    /// Resolves the regular and bold styles of `config` against `provider`.
    pub fn resolve(provider: &mut FontProvider, config: &LayoutConfig) -> Result<Self> {
        Ok(Self {
            regular: provider.resolve(&config.regular)?,
            bold: provider.resolve(&config.bold)?,
        })
    }

    pub fn style(&self, style: FontStyle) -> &StyleFonts {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

impl CharMetrics for TypographyFonts {
    fn char_width(&self, style: FontStyle, ch: char) -> f32 {
        self.style(style).char_width(ch)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_provider_is_empty() {
        let provider = FontProvider::new();

        assert!(provider.is_empty());
        assert_eq!(provider.len(), 0);
    }

    #[test]
    fn resolving_against_an_empty_database_fails() {
        let mut provider = FontProvider::new();
        let err = provider
            .resolve(&TypographyStyle::regular_default())
            .unwrap_err();

        assert!(matches!(err, Error::Font { .. }));
    }

    #[test]
    fn invalid_binary_data_registers_nothing() {
        let mut provider = FontProvider::new();
        provider.register_binary(vec![0u8; 64]);

        assert!(provider.is_empty());
    }

    #[test]
    fn registering_a_missing_file_reports_the_path() {
        let mut provider = FontProvider::new();
        let err = provider
            .register_file("/nonexistent/font.ttf")
            .unwrap_err();

        match err {
            Error::Font { family, .. } => assert!(family.contains("font.ttf")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
