//! Quote card generation.
//!
//! [`QuoteGenerator`] ties the pipeline together: validate the input, split
//! it into segments, lay every segment out against the template's
//! configuration, and render one PNG per segment onto the template
//! background.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::font_provider::{FontProvider, TypographyFonts};
use crate::glyph_width::{CharMetrics, WidthTable};
use crate::render::{Canvas, Compositor};
use crate::template::TemplateStore;
use crate::text::{self, LayoutResult};
use crate::typography::LayoutConfig;

/// Longest accepted quote, in characters.
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Checks that `text` is renderable: non-blank after trimming and at most
/// [`MAX_TEXT_LENGTH`] characters.
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::validation("text", "text cannot be empty"));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(Error::validation(
            "text",
            format!("text is too long (max {MAX_TEXT_LENGTH} characters)"),
        ));
    }
    Ok(())
}

/// Checks that `key` names a template at all.
///
/// Well-formed keys that are not in the store are accepted here; the store
/// resolves them to its default template later.
pub fn validate_template_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::validation("template", "template key cannot be blank"));
    }
    Ok(())
}

/// Runs the pure layout pipeline over every segment of `text`.
///
/// Segments whose tokens dissolve entirely (for example a lone `****`) are
/// skipped, since positioning is only defined for at least one line. Input
/// is taken as already validated.
pub fn layout_segments(
    text: &str,
    config: &LayoutConfig,
    widths: &WidthTable,
) -> Vec<LayoutResult> {
    text::segment(text)
        .into_iter()
        .filter_map(|piece| {
            let tokens = text::tokenize(piece);
            if tokens.is_empty() {
                return None;
            }
            let lines = text::wrap(tokens, config.max_width(), widths);
            Some(text::position(lines, config))
        })
        .collect()
}

/// One finished card image.
pub struct QuoteImage {
    /// PNG-encoded pixel data.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The full text-to-image pipeline behind one shared handle.
///
/// Fonts are resolved and the width table is built once, from the default
/// template's typography, when the generator is constructed. `generate`
/// takes `&self`, so a generator can be shared across threads; concurrent
/// calls serialize only on the glyph raster cache.
pub struct QuoteGenerator {
    templates: TemplateStore,
    fonts: Arc<TypographyFonts>,
    widths: Arc<WidthTable>,
    compositor: Mutex<Compositor>,
}

impl std::fmt::Debug for QuoteGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteGenerator")
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

impl QuoteGenerator {
    /// Resolves the default template's typography against `provider` and
    /// builds the shared width table.
    ///
    /// The provider is consumed: the resolved font chains keep the parsed
    /// fonts alive, so fonts must be registered before construction.
    pub fn new(mut provider: FontProvider, templates: TemplateStore) -> Result<Self> {
        let default_layout = templates.default_spec().layout.clone();
        let fonts = Arc::new(TypographyFonts::resolve(&mut provider, &default_layout)?);
        let widths = Arc::new(WidthTable::build(Arc::clone(&fonts) as Arc<dyn CharMetrics>));

        Ok(Self {
            templates,
            fonts,
            widths,
            compositor: Mutex::new(Compositor::new()),
        })
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn widths(&self) -> &Arc<WidthTable> {
        &self.widths
    }

    /// Renders `text` on the given template, one image per segment.
    ///
    /// Segments are rendered in input order. A segment with no renderable
    /// tokens still produces an image: the bare template background.
    pub fn generate(&self, text: &str, template_key: &str) -> Result<Vec<QuoteImage>> {
        validate_text(text)?;
        validate_template_key(template_key)?;

        let spec = self.templates.spec(template_key);
        let config = &spec.layout;
        let background = self.templates.load_background(template_key)?;

        let segments = text::segment(text);
        let mut images = Vec::with_capacity(segments.len());

        for piece in segments {
            let mut canvas = Canvas::from_background(background.clone());
            let tokens = text::tokenize(piece);

            if !tokens.is_empty() {
                let lines = text::wrap(tokens, config.max_width(), &self.widths);
                let layout = text::position(lines, config);
                self.compositor.lock().draw_quote(
                    &mut canvas,
                    &layout,
                    &self.widths,
                    &self.fonts,
                    config,
                );
            }

            images.push(QuoteImage {
                width: canvas.width,
                height: canvas.height,
                data: canvas.encode_png()?,
            });
        }

        log::debug!("generated {} image(s) for template '{}'", images.len(), template_key);
        Ok(images)
    }

    /// Computes layouts for `text` without rendering.
    pub fn layout_segments(&self, text: &str, template_key: &str) -> Result<Vec<LayoutResult>> {
        validate_text(text)?;
        validate_template_key(template_key)?;

        let config = &self.templates.spec(template_key).layout;
        Ok(layout_segments(text, config, &self.widths))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::glyph_width::UniformWidths;

    fn uniform_table() -> WidthTable {
        WidthTable::build(Arc::new(UniformWidths::new(10.0, 5.0)))
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(
            validate_text("").unwrap_err(),
            Error::Validation { field: "text", .. }
        ));
        assert!(matches!(
            validate_text("   \n\t  ").unwrap_err(),
            Error::Validation { field: "text", .. }
        ));
    }

    #[test]
    fn overlong_text_is_rejected() {
        let text = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            validate_text(&text).unwrap_err(),
            Error::Validation { field: "text", .. }
        ));
    }

    #[test]
    fn limit_length_text_is_accepted() {
        let text = "a".repeat(MAX_TEXT_LENGTH);
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn blank_template_key_is_rejected() {
        assert!(matches!(
            validate_template_key("  ").unwrap_err(),
            Error::Validation {
                field: "template",
                ..
            }
        ));
        assert!(validate_template_key("template1").is_ok());
        // Unknown keys resolve to the default later, so they pass here.
        assert!(validate_template_key("template99").is_ok());
    }

    #[test]
    fn each_segment_gets_its_own_layout() {
        let widths = uniform_table();
        let config = LayoutConfig::default();

        let layouts = layout_segments("Stay hungry --- Stay **foolish**", &config, &widths);

        assert_eq!(layouts.len(), 2);
        // "Stay hungry": 40 + 5 + 60 on one line.
        assert_eq!(layouts[0].lines.len(), 1);
        assert_eq!(layouts[0].lines[0].line.width, 105.0);
        // "Stay **foolish**": the span keeps its bold flag through layout.
        let second = &layouts[1].lines[0];
        assert!(second.line.tokens[1].bold);
        assert_eq!(second.origin.y, config.anchor().y);
    }

    #[test]
    fn dissolving_segments_are_skipped_in_layout() {
        let widths = uniform_table();
        let config = LayoutConfig::default();

        let layouts = layout_segments("real words --- ****", &config, &widths);

        assert_eq!(layouts.len(), 1);
        assert!(layout_segments("****", &config, &widths).is_empty());
    }

    #[test]
    fn layouts_center_on_the_configured_canvas() {
        let widths = uniform_table();
        let config = LayoutConfig {
            canvas_width: 1000,
            canvas_height: 1000,
            max_width_ratio: 0.3,
            ..LayoutConfig::default()
        };

        let layouts = layout_segments("Hello World", &config, &widths);

        assert_eq!(layouts.len(), 1);
        let line = &layouts[0].lines[0];
        // 105px line centered on the 1000px canvas.
        assert_eq!(line.origin.x, 500.0 - 52.5);
        assert_eq!(line.origin.y, 350.0);
        assert_eq!(layouts[0].max_width, 300.0);
    }

    #[test]
    fn construction_requires_a_usable_font() {
        let err = QuoteGenerator::new(FontProvider::new(), TemplateStore::default()).unwrap_err();

        assert!(matches!(err, Error::Font { .. }));
    }
}
