use std::collections::HashMap;
use std::sync::Arc;

use crate::text::Token;
use crate::typography::FontStyle;

/// Characters measured eagerly when a [`WidthTable`] is built.
///
/// Everything outside this set degrades to an on-demand measurement through
/// the table's metrics source.
pub const COMMON_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,:;!?'\"()-_[]{}@#$%^&*+=<>/\\|`~";

/// Provides the rendered advance width of a single character.
///
/// This is the seam between the layout pipeline and the font stack: the
/// resolved font chain implements it for production use, and
/// [`UniformWidths`] implements it for deterministic tests and previews.
pub trait CharMetrics: Send + Sync {
    /// Advance width of `ch` in the given style, in pixels.
    fn char_width(&self, style: FontStyle, ch: char) -> f32;
}

/// Fixed-width metrics source with one width for spaces and one for
/// everything else. Suitable for tests and coordinate previews where no
/// fonts are available.
#[derive(Clone, Copy, Debug)]
pub struct UniformWidths {
    pub char_width: f32,
    pub space_width: f32,
}

impl UniformWidths {
    pub fn new(char_width: f32, space_width: f32) -> Self {
        Self {
            char_width,
            space_width,
        }
    }
}

impl CharMetrics for UniformWidths {
    fn char_width(&self, _style: FontStyle, ch: char) -> f32 {
        if ch == ' ' {
            self.space_width
        } else {
            self.char_width
        }
    }
}

/// Immutable per-style character width table.
///
/// Built once per process for a given style pair and shared by reference
/// afterwards; lookups never mutate it. Characters missing from the table
/// are measured through the stored [`CharMetrics`] source on every call.
/// Results are not written back, so a repeated miss repeats the
/// measurement.
pub struct WidthTable {
    regular: HashMap<char, f32, fxhash::FxBuildHasher>,
    bold: HashMap<char, f32, fxhash::FxBuildHasher>,
    source: Arc<dyn CharMetrics>,
}

impl WidthTable {
    /// Builds the table over [`COMMON_CHARS`].
    pub fn build(source: Arc<dyn CharMetrics>) -> Self {
        Self::build_with_charset(source, COMMON_CHARS)
    }

    /// Builds the table by measuring every character of `charset` once per
    /// style through `source`.
    pub fn build_with_charset(source: Arc<dyn CharMetrics>, charset: &str) -> Self {
        let mut regular = HashMap::with_hasher(fxhash::FxBuildHasher::default());
        let mut bold = HashMap::with_hasher(fxhash::FxBuildHasher::default());

        for ch in charset.chars() {
            regular.insert(ch, source.char_width(FontStyle::Regular, ch));
            bold.insert(ch, source.char_width(FontStyle::Bold, ch));
        }

        log::debug!("width table built: {} characters per style", regular.len());

        Self {
            regular,
            bold,
            source,
        }
    }

    fn table(&self, style: FontStyle) -> &HashMap<char, f32, fxhash::FxBuildHasher> {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    /// Advance width of `ch` in `style`.
    ///
    /// Cache misses fall through to a direct measurement and are remeasured
    /// on every subsequent miss.
    pub fn width_of(&self, style: FontStyle, ch: char) -> f32 {
        if let Some(&width) = self.table(style).get(&ch) {
            return width;
        }

        log::debug!("measuring uncached character {ch:?}");
        self.source.char_width(style, ch)
    }

    /// Width of the inter-word separator: a regular-style space, regardless
    /// of the surrounding bold state.
    pub fn space_width(&self) -> f32 {
        self.width_of(FontStyle::Regular, ' ')
    }

    /// Width of one word: the sum of its per-character widths in the word's
    /// style.
    pub fn token_width(&self, token: &Token) -> f32 {
        let style = FontStyle::from_bold(token.bold);
        token.text.chars().map(|ch| self.width_of(style, ch)).sum()
    }

    /// Width of a full line: token widths plus one regular space between
    /// each pair of adjacent tokens.
    pub fn line_width(&self, tokens: &[Token]) -> f32 {
        let mut total = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            total += self.token_width(token);
            if i + 1 < tokens.len() {
                total += self.space_width();
            }
        }
        total
    }
}
