//! Themes, target platforms and per-theme colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visual theme. Each theme has its own CSS, PNG and SVG directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`Theme::from_name`], but unknown names fall back to the default
    /// theme.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            let fallback = Self::default();
            log::warn!("unknown theme '{name}', using '{fallback}'");
            fallback
        })
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors {
                font_color: Color::rgb(0, 0, 0),
                dimmed_font_color: Color::rgb(128, 128, 128),
                harp_color: Color::rgb(255, 255, 255),
                text_bkg: Color::rgba(255, 255, 255, 0),
                song_bkg: Color::rgb(255, 255, 255),
                hr_color: Color::rgb(0, 0, 0),
            },
            Theme::Dark => ThemeColors {
                font_color: Color::rgb(255, 255, 255),
                dimmed_font_color: Color::rgb(128, 128, 128),
                harp_color: Color::rgb(40, 40, 40),
                text_bkg: Color::rgba(40, 40, 40, 0),
                song_bkg: Color::rgb(40, 40, 40),
                hr_color: Color::rgb(255, 255, 255),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output platform. Mobile shows the touchscreen harp; the console
/// platforms show gamepad buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Mobile,
    Playstation,
    Switch,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Mobile, Platform::Playstation, Platform::Switch];

    pub fn name(self) -> &'static str {
        match self {
            Platform::Mobile => "mobile",
            Platform::Playstation => "playstation",
            Platform::Switch => "switch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Note shown as a sample in help texts ("A-root" on mobile, "X" on gamepads).
    pub fn typical_note(self) -> &'static str {
        match self {
            Platform::Mobile => "A-root",
            Platform::Playstation | Platform::Switch => "X",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color notation; opaque colors use `#rrggbb`.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = f64::from(self.a) / 255.0;
            format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Theme-dependent colors used by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub font_color: Color,
    pub dimmed_font_color: Color,
    pub harp_color: Color,
    pub text_bkg: Color,
    pub song_bkg: Color,
    pub hr_color: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Theme::default().colors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names() {
        assert_eq!(Theme::from_name("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name(" light "), Some(Theme::Light));
        assert_eq!(Theme::from_name("sepia"), None);
        assert_eq!(Theme::resolve("sepia"), Theme::Light);
    }

    #[test]
    fn platform_names() {
        assert_eq!(Platform::from_name("SWITCH"), Some(Platform::Switch));
        assert_eq!(Platform::from_name("xbox"), None);
        assert_eq!(Platform::Mobile.typical_note(), "A-root");
        assert_eq!(Platform::Playstation.typical_note(), "X");
    }

    #[test]
    fn css_colors() {
        assert_eq!(Color::rgb(40, 40, 40).to_css(), "#282828");
        assert_eq!(Color::rgba(255, 255, 255, 0).to_css(), "rgba(255, 255, 255, 0.00)");
        assert_eq!(Theme::Dark.colors().font_color, Color::rgb(255, 255, 255));
    }
}
