//! # Tanzaku
//!
//! A quote card generator: turns short texts into square share images.
//!
//! ## Overview
//!
//! `Tanzaku` lays out quote text on a themed background and renders it to
//! PNG on the CPU. Input is split into segments on `---`, each segment
//! becomes one image, and `**bold**` spans switch to the bold typeface.
//! The entry point is the [`QuoteGenerator`], which coordinates font
//! resolution, width measurement, layout, and rendering.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tanzaku::{FontProvider, QuoteGenerator, TemplateStore};
//!
//! # fn main() -> tanzaku::Result<()> {
//! // 1. Register fonts
//! let mut fonts = FontProvider::new();
//! fonts.register_file("assets/fonts/Jost-Medium.ttf")?;
//! fonts.register_file("assets/fonts/Jost-Bold.ttf")?;
//!
//! // 2. Build a generator over the template set
//! let generator = QuoteGenerator::new(fonts, TemplateStore::default())?;
//!
//! // 3. Generate one PNG per segment
//! let images = generator.generate("Stay hungry --- Stay **foolish**", "template2")?;
//! for image in &images {
//!     // image.data holds the encoded PNG
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! *   **Deterministic Layout**: Width-table-driven wrapping and centering,
//!     reproducible across runs.
//! *   **Bold Spans**: Inline `**...**` markup rendered in a second typeface.
//! *   **Template Sets**: Six built-in themes, extensible via TOML.
//! *   **Thread Safety**: A generator can be shared across threads.

pub mod error;
pub mod font_provider;
pub mod generate;
pub mod glyph_width;
pub mod render;
pub mod template;
pub mod text;
pub mod typography;

// common re-exports
pub use error::{Error, Result};
pub use font_provider::FontProvider;
pub use generate::{QuoteGenerator, QuoteImage};
pub use glyph_width::{UniformWidths, WidthTable};
pub use template::TemplateStore;

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use parking_lot;
