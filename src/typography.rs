use euclid::default::Point2D;
use serde::{Deserialize, Serialize};

/// Default font stack of the built-in templates.
const REGULAR_FAMILY: &str = "Jost Medium";
const BOLD_FAMILY: &str = "Jost Bold";
const FALLBACK_FAMILY: &str = "CrimsonText Regular";

/// Built-in canvas is the square social-card format.
const CANVAS_SIZE: u32 = 1080;

/// Selects one of the two style slots of a [`LayoutConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    pub fn from_bold(bold: bool) -> Self {
        if bold { Self::Bold } else { Self::Regular }
    }
}

/// Opaque RGB fill color, written as `#RRGGBB` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` hex triple.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color '{value}', expected #RRGGBB"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Font selection and paint settings for one style slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyStyle {
    /// Primary font family name as registered with the font provider.
    pub family: String,
    /// Families tried, in order, when the primary lacks a glyph.
    /// A generic serif is always appended at resolution time.
    pub fallbacks: Vec<String>,
    /// Font size in pixels.
    pub size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub color: Color,
    /// Fill opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl TypographyStyle {
    /// Style of regular text in the built-in templates.
    pub fn regular_default() -> Self {
        Self {
            family: REGULAR_FAMILY.to_string(),
            fallbacks: vec![FALLBACK_FAMILY.to_string()],
            size: 42.0,
            line_height: 1.5,
            color: Color::new(0xF5, 0xF2, 0xED),
            opacity: 0.85,
        }
    }

    /// Style of `**bold**` spans in the built-in templates.
    pub fn bold_default() -> Self {
        Self {
            family: BOLD_FAMILY.to_string(),
            ..Self::regular_default()
        }
    }
}

impl Default for TypographyStyle {
    fn default() -> Self {
        Self::regular_default()
    }
}

/// Canvas geometry and typography for one template.
///
/// Loaded once per template and never mutated afterwards; every layout call
/// receives it by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fraction of the canvas width usable for text.
    pub max_width_ratio: f32,
    /// Fraction of the canvas height giving the vertical anchor.
    pub margin_top_ratio: f32,
    pub regular: TypographyStyle,
    pub bold: TypographyStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
            max_width_ratio: 0.7,
            margin_top_ratio: 0.35,
            regular: TypographyStyle::regular_default(),
            bold: TypographyStyle::bold_default(),
        }
    }
}

impl LayoutConfig {
    /// Maximum text width in pixels.
    pub fn max_width(&self) -> f32 {
        self.canvas_width as f32 * self.max_width_ratio
    }

    /// Anchor point the text block is centered around: horizontal canvas
    /// center, vertical position given by `margin_top_ratio`.
    pub fn anchor(&self) -> Point2D<f32> {
        Point2D::new(
            self.canvas_width as f32 / 2.0,
            self.canvas_height as f32 * self.margin_top_ratio,
        )
    }

    /// Vertical distance between consecutive lines, in pixels.
    ///
    /// The regular style drives block spacing regardless of bold spans.
    pub fn line_height(&self) -> f32 {
        self.regular.size * self.regular.line_height
    }

    pub fn style(&self, style: FontStyle) -> &TypographyStyle {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}
