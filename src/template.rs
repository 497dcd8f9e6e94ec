//! Card templates.
//!
//! A template pairs a background image with the layout configuration used
//! to place text on it. The built-in set mirrors the shipped theme assets;
//! a TOML file can replace or extend it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::typography::LayoutConfig;

const DEFAULT_ASSETS_DIR: &str = "assets/templates";
const DEFAULT_KEY: &str = "template1";
const BUILTIN_COUNT: usize = 6;

/// One card template: a background file plus its layout configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSpec {
    /// Background file name, resolved against the store's assets directory.
    pub background: String,
    /// Human-readable name for template pickers.
    pub label: String,
    pub layout: LayoutConfig,
}

impl Default for TemplateSpec {
    fn default() -> Self {
        Self {
            background: "theme-01.png".to_string(),
            label: "Template 1".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Ordered template set with a designated default.
///
/// Lookups never fail: an unknown key falls back to the default template
/// with a warning, so a stale key still produces a card.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    templates: Vec<(String, TemplateSpec)>,
    assets_dir: PathBuf,
    default_key: String,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateStore {
    /// The built-in six-template set, `template1` through `template6`.
    pub fn builtin() -> Self {
        let templates = (1..=BUILTIN_COUNT)
            .map(|index| {
                let spec = TemplateSpec {
                    background: format!("theme-{index:02}.png"),
                    label: format!("Template {index}"),
                    layout: LayoutConfig::default(),
                };
                (format!("template{index}"), spec)
            })
            .collect();

        Self {
            templates,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            default_key: DEFAULT_KEY.to_string(),
        }
    }

    /// Replaces the directory background files are resolved against.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Parses a template set from TOML source.
    ///
    /// Every field is optional: omitted templates leave the built-in set in
    /// place, and omitted spec fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: TemplateSetFile =
            toml::from_str(source).map_err(|err| Error::template("template set", err))?;
        Ok(Self::from_file_spec(file))
    }

    /// Loads a template set from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|err| Error::template(path.display().to_string(), err))?;
        let file: TemplateSetFile =
            toml::from_str(&source).map_err(|err| Error::template(path.display().to_string(), err))?;
        Ok(Self::from_file_spec(file))
    }

    fn from_file_spec(file: TemplateSetFile) -> Self {
        if file.templates.is_empty() {
            return Self::builtin().with_assets_dir(file.assets_dir);
        }

        let templates: Vec<(String, TemplateSpec)> = file
            .templates
            .into_iter()
            .map(|entry| {
                (
                    entry.key,
                    TemplateSpec {
                        background: entry.background,
                        label: entry.label,
                        layout: entry.layout,
                    },
                )
            })
            .collect();

        let default_key = if templates.iter().any(|(key, _)| *key == file.default) {
            file.default
        } else {
            let first = templates[0].0.clone();
            log::warn!(
                "declared default template '{}' is not in the set, using '{}'",
                file.default,
                first
            );
            first
        };

        Self {
            templates,
            assets_dir: file.assets_dir,
            default_key,
        }
    }

    /// Key of the default template.
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Spec of the default template.
    pub fn default_spec(&self) -> &TemplateSpec {
        self.spec(&self.default_key)
    }

    /// Looks up `key`, falling back to the default template when unknown.
    pub fn spec(&self, key: &str) -> &TemplateSpec {
        if let Some((_, spec)) = self.templates.iter().find(|(name, _)| name == key) {
            return spec;
        }

        if key != self.default_key {
            log::warn!("unknown template '{}', falling back to '{}'", key, self.default_key);
        }
        // builtin() and from_file_spec() both guarantee the default key is
        // present in the non-empty set.
        match self
            .templates
            .iter()
            .find(|(name, _)| *name == self.default_key)
        {
            Some((_, spec)) => spec,
            None => &self.templates[0].1,
        }
    }

    /// Iterates over the templates in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &TemplateSpec)> {
        self.templates
            .iter()
            .map(|(key, spec)| (key.as_str(), spec))
    }

    /// Keys of every template, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|(key, _)| key.as_str())
    }

    /// Loads the background image for `key`, scaled to the template's
    /// canvas size.
    ///
    /// Unknown keys fall back to the default template first, so errors here
    /// mean the resolved background file itself could not be read.
    pub fn load_background(&self, key: &str) -> Result<image::RgbaImage> {
        let spec = self.spec(key);
        let path = self.assets_dir.join(&spec.background);

        let decoded = image::open(&path)
            .map_err(|err| Error::template(key, err))?
            .to_rgba8();

        let canvas_width = spec.layout.canvas_width;
        let canvas_height = spec.layout.canvas_height;
        if decoded.dimensions() == (canvas_width, canvas_height) {
            return Ok(decoded);
        }

        Ok(image::imageops::resize(
            &decoded,
            canvas_width,
            canvas_height,
            image::imageops::FilterType::Triangle,
        ))
    }
}

/// On-disk TOML shape of a template set.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct TemplateSetFile {
    assets_dir: PathBuf,
    default: String,
    templates: Vec<TemplateFileEntry>,
}

impl Default for TemplateSetFile {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            default: DEFAULT_KEY.to_string(),
            templates: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TemplateFileEntry {
    key: String,
    background: String,
    label: String,
    layout: LayoutConfig,
}

impl Default for TemplateFileEntry {
    fn default() -> Self {
        let spec = TemplateSpec::default();
        Self {
            key: DEFAULT_KEY.to_string(),
            background: spec.background,
            label: spec.label,
            layout: spec.layout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_has_six_numbered_templates() {
        let store = TemplateStore::builtin();
        let keys: Vec<&str> = store.keys().collect();

        assert_eq!(
            keys,
            vec![
                "template1",
                "template2",
                "template3",
                "template4",
                "template5",
                "template6",
            ]
        );
        assert_eq!(store.spec("template3").background, "theme-03.png");
        assert_eq!(store.default_key(), "template1");

        let labels: Vec<&str> = store
            .templates()
            .map(|(_, spec)| spec.label.as_str())
            .collect();
        assert_eq!(labels.first(), Some(&"Template 1"));
        assert_eq!(labels.last(), Some(&"Template 6"));
    }

    #[test]
    fn unknown_keys_fall_back_to_the_default() {
        let store = TemplateStore::builtin();

        assert_eq!(store.spec("template99"), store.default_spec());
        assert_eq!(store.spec(""), store.default_spec());
    }

    #[test]
    fn toml_set_replaces_the_builtins() {
        let store = TemplateStore::from_toml_str(
            r##"
            assets_dir = "backgrounds"
            default = "night"

            [[templates]]
            key = "night"
            background = "night.png"
            label = "Night"

            [[templates]]
            key = "paper"
            background = "paper.jpg"
            label = "Paper"

            [templates.layout]
            max_width_ratio = 0.5

            [templates.layout.regular]
            size = 36.0
            color = "#101010"
            "##,
        )
        .unwrap();

        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["night", "paper"]);
        assert_eq!(store.default_key(), "night");

        let paper = store.spec("paper");
        assert_eq!(paper.background, "paper.jpg");
        assert_eq!(paper.layout.max_width_ratio, 0.5);
        assert_eq!(paper.layout.regular.size, 36.0);
        assert_eq!(paper.layout.regular.color.to_hex(), "#101010");
        // Omitted fields keep their defaults.
        assert_eq!(paper.layout.canvas_width, 1080);
        assert_eq!(store.spec("night").layout.max_width_ratio, 0.7);
    }

    #[test]
    fn empty_toml_keeps_the_builtin_set() {
        let store = TemplateStore::from_toml_str("assets_dir = \"elsewhere\"").unwrap();

        assert_eq!(store.keys().count(), 6);
        assert_eq!(store.default_key(), "template1");
        assert_eq!(store.assets_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn missing_declared_default_falls_back_to_the_first_entry() {
        let store = TemplateStore::from_toml_str(
            r#"
            default = "gone"

            [[templates]]
            key = "only"
            background = "only.png"
            label = "Only"
            "#,
        )
        .unwrap();

        assert_eq!(store.default_key(), "only");
    }

    #[test]
    fn malformed_toml_is_a_template_error() {
        let err = TemplateStore::from_toml_str("default = [not toml").unwrap_err();

        assert!(matches!(err, Error::Template { .. }));
    }

    #[test]
    fn missing_background_file_is_a_template_error() {
        let store = TemplateStore::builtin().with_assets_dir("/nonexistent/assets");
        let err = store.load_background("template1").unwrap_err();

        match err {
            Error::Template { key, .. } => assert_eq!(key, "template1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn backgrounds_are_scaled_to_the_canvas() {
        let dir = std::env::temp_dir().join("tanzaku-template-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("theme-01.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let mut store = TemplateStore::from_toml_str(
            r#"
            [[templates]]
            key = "template1"
            background = "theme-01.png"
            label = "Tiny"

            [templates.layout]
            canvas_width = 8
            canvas_height = 8
            "#,
        )
        .unwrap();
        store.assets_dir = dir.clone();

        let background = store.load_background("template1").unwrap();
        assert_eq!(background.dimensions(), (8, 8));
        assert_eq!(background.get_pixel(4, 4).0, [10, 20, 30, 255]);

        std::fs::remove_file(path).ok();
    }
}
