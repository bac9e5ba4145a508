//! Theme resources — CSS, PNG sprites, SVG templates, fonts and gamepad
//! pictures for one theme and one platform.
//!
//! A [`ResourceSet`] is loaded once, explicitly, from a resource directory or
//! a zip bundle, and is immutable afterwards. Loading fails if the theme
//! ships no assets of a required kind, so a broken install is reported at
//! startup instead of producing empty sheets later.
//!
//! Layout, relative to the resource root:
//!
//! ```text
//! css/<theme>/*.css
//! png/<theme>/<platform>/*.png
//! svg/<theme>/*.svg
//! fonts/<font file>
//! gamepads/<platform>/*.{jpg,jpeg,png,webp,gif,tif,tiff}   (optional)
//! ```

mod fonts;
mod settings;
mod source;
mod theme;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fonts::{font_for_locale, locale_prefix, FONTS};
pub use settings::*;
pub use theme::{Color, Platform, Theme, ThemeColors};

use source::{ArchiveSource, AssetSource, DirSource};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const GAMEPAD_IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "gif", "tif", "tiff"];
const HIGHLIGHT_SPRITE_PREFIX: &str = "root-highlighted-";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read resource archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),
    #[error("no {kind} file found in '{dir}'")]
    MissingAssets { kind: &'static str, dir: String },
    #[error("'{0}' is not a PNG image")]
    InvalidPng(String),
    #[error("'{path}' is not valid UTF-8")]
    NotUtf8 { path: String },
    #[error("SVG template '{path}' is malformed: {message}")]
    InvalidSvg { path: String, message: String },
    #[error("font '{file}' for locale '{locale}' not found")]
    MissingFont { locale: String, file: String },
}

/// What to load: names are resolved when the set is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Theme name; unknown names fall back to the default theme
    pub theme: String,
    /// Platform name: "mobile", "playstation" or "switch"
    pub platform: String,
    /// Locale tag used to pick the font (e.g. "ja_JP")
    pub locale: String,
}

impl ResourceConfig {
    pub fn new(theme: Theme, platform: Platform, locale: &str) -> Self {
        Self {
            theme: theme.name().to_string(),
            platform: platform.name().to_string(),
            locale: locale.to_string(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self::new(Theme::default(), Platform::default(), "ja")
    }
}

/// A font file loaded from `fonts/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Every asset of one theme for one platform, plus the settings derived from
/// them.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    theme: Theme,
    platform: Platform,
    colors: ThemeColors,
    png_settings: PngSettings,
    svg_settings: SvgSettings,
    css: BTreeMap<String, String>,
    svg: BTreeMap<String, String>,
    png: BTreeMap<String, Vec<u8>>,
    font: Font,
    gamepad_images: Vec<String>,
}

impl ResourceSet {
    /// Load from a resource directory.
    pub fn from_dir<P: AsRef<Path>>(root: P, config: &ResourceConfig) -> Result<Self, ResourceError> {
        let root = root.as_ref();
        log::debug!("loading resources from '{}'", root.display());
        load(&mut DirSource::new(root), config)
    }

    /// Load from a zip bundle with the same layout as a resource directory.
    pub fn from_archive(data: &[u8], config: &ResourceConfig) -> Result<Self, ResourceError> {
        log::debug!("loading resources from a {} byte archive", data.len());
        load(&mut ArchiveSource::new(data)?, config)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn png_settings(&self) -> &PngSettings {
        &self.png_settings
    }

    pub fn svg_settings(&self) -> &SvgSettings {
        &self.svg_settings
    }

    /// Stylesheet by extension-stripped file name (e.g. "svg", "html_base").
    pub fn css(&self, name: &str) -> Option<&str> {
        self.css.get(name).map(String::as_str)
    }

    pub fn svg(&self, name: &str) -> Option<&str> {
        self.svg.get(name).map(String::as_str)
    }

    pub fn png(&self, name: &str) -> Option<&[u8]> {
        self.png.get(name).map(Vec::as_slice)
    }

    pub fn css_names(&self) -> impl Iterator<Item = &str> {
        self.css.keys().map(String::as_str)
    }

    pub fn svg_names(&self) -> impl Iterator<Item = &str> {
        self.svg.keys().map(String::as_str)
    }

    pub fn png_names(&self) -> impl Iterator<Item = &str> {
        self.png.keys().map(String::as_str)
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Relative paths of the gamepad help pictures for the platform.
    pub fn gamepad_images(&self) -> &[String] {
        &self.gamepad_images
    }
}

/// Theme names available in a resource directory (sub-directories of `css/`).
pub fn detect_themes<P: AsRef<Path>>(root: P) -> Result<Vec<String>, ResourceError> {
    DirSource::new(root.as_ref()).list("css", true)
}

/// Theme names available in a zip bundle, as [`detect_themes`].
pub fn detect_archive_themes(data: &[u8]) -> Result<Vec<String>, ResourceError> {
    ArchiveSource::new(data)?.list("css", true)
}

fn load(source: &mut dyn AssetSource, config: &ResourceConfig) -> Result<ResourceSet, ResourceError> {
    let theme = Theme::resolve(&config.theme);
    let platform = Platform::from_name(&config.platform)
        .ok_or_else(|| ResourceError::UnknownPlatform(config.platform.clone()))?;

    let png_dir = format!("png/{theme}/{platform}");
    let png = load_assets(source, &png_dir, "PNG", "png")?;
    for (name, data) in &png {
        if !data.starts_with(&PNG_SIGNATURE) {
            return Err(ResourceError::InvalidPng(format!("{png_dir}/{name}.png")));
        }
    }

    let css_dir = format!("css/{theme}");
    let css = load_text_assets(source, &css_dir, "CSS", "css")?;

    let svg_dir = format!("svg/{theme}");
    let svg = load_text_assets(source, &svg_dir, "SVG", "svg")?;
    for (name, text) in &svg {
        roxmltree::Document::parse(text).map_err(|e| ResourceError::InvalidSvg {
            path: format!("{svg_dir}/{name}.svg"),
            message: e.to_string(),
        })?;
    }

    let font_file = font_for_locale(&config.locale);
    let font_data = source
        .read(&format!("fonts/{font_file}"))?
        .ok_or_else(|| ResourceError::MissingFont {
            locale: config.locale.clone(),
            file: font_file.to_string(),
        })?;

    let gamepad_dir = format!("gamepads/{platform}");
    let gamepad_images = source
        .list(&gamepad_dir, false)?
        .into_iter()
        .filter(|name| has_extension(name, &GAMEPAD_IMAGE_EXTENSIONS))
        .map(|name| format!("{gamepad_dir}/{name}"))
        .collect();

    let mut png_settings = PngSettings::default();
    if platform == Platform::Mobile {
        png_settings.max_quavers = count_highlight_sprites(png.keys());
    }

    log::debug!(
        "loaded theme '{theme}' for {platform}: {} css, {} svg, {} png, font {font_file}",
        css.len(),
        svg.len(),
        png.len()
    );

    Ok(ResourceSet {
        theme,
        platform,
        colors: theme.colors(),
        png_settings,
        svg_settings: SvgSettings::default(),
        css,
        svg,
        png,
        font: Font {
            file_name: font_file.to_string(),
            data: font_data,
        },
        gamepad_images,
    })
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Read every `*.<extension>` file in `dir`, keyed by stem. At least one is
/// required.
fn load_assets(
    source: &mut dyn AssetSource,
    dir: &str,
    kind: &'static str,
    extension: &str,
) -> Result<BTreeMap<String, Vec<u8>>, ResourceError> {
    let mut assets = BTreeMap::new();
    for name in source.list(dir, false)? {
        if !has_extension(&name, &[extension]) {
            continue;
        }
        if let Some(data) = source.read(&format!("{dir}/{name}"))? {
            assets.insert(file_stem(&name).to_string(), data);
        }
    }
    if assets.is_empty() {
        log::error!("could not find any {kind} file to embed from '{dir}'");
        return Err(ResourceError::MissingAssets {
            kind,
            dir: dir.to_string(),
        });
    }
    Ok(assets)
}

fn load_text_assets(
    source: &mut dyn AssetSource,
    dir: &str,
    kind: &'static str,
    extension: &str,
) -> Result<BTreeMap<String, String>, ResourceError> {
    load_assets(source, dir, kind, extension)?
        .into_iter()
        .map(|(name, data)| {
            String::from_utf8(data)
                .map(|text| (name.clone(), text))
                .map_err(|_| ResourceError::NotUtf8 {
                    path: format!("{dir}/{name}.{extension}"),
                })
        })
        .collect()
}

/// Number of `root-highlighted-<n>` sprites: one per animation frame.
fn count_highlight_sprites<'a>(names: impl Iterator<Item = &'a String>) -> usize {
    names
        .filter(|name| {
            name.strip_prefix(HIGHLIGHT_SPRITE_PREFIX)
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_highlight_sprites() {
        let names: Vec<String> = [
            "root-highlighted-0",
            "root-highlighted-1",
            "root-highlighted-12",
            "root-highlighted-",
            "root-unhighlighted",
            "diamond-highlighted-0",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(count_highlight_sprites(names.iter()), 3);
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert!(has_extension("pad.JPG", &GAMEPAD_IMAGE_EXTENSIONS));
        assert!(!has_extension("notes.txt", &GAMEPAD_IMAGE_EXTENSIONS));
        assert_eq!(file_stem("html_base.css"), "html_base");
    }

    #[test]
    fn config_defaults_from_json() {
        let config: ResourceConfig = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.platform, "mobile");
        assert_eq!(config.locale, "ja");
    }
}
