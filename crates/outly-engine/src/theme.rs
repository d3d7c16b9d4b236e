//! Color palettes.
//!
//! A palette is carried as a field on the application state and passed
//! into layout, never read from a global.

use strum::{Display, EnumString};

/// Hex colors consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub text_regular: &'static str,
    pub text_selected: &'static str,
    pub circle_regular: &'static str,
    pub circle_selected: &'static str,
}

impl Theme {
    pub const DARK: Theme = Theme {
        background: "#0f0f0f",
        text_regular: "#b0b0b0",
        text_selected: "#ffffff",
        circle_regular: "#6a6a6a",
        circle_selected: "#ffffff",
    };

    pub const LIGHT: Theme = Theme {
        background: "#fafafa",
        text_regular: "#4a4a4a",
        text_selected: "#000000",
        circle_regular: "#9a9a9a",
        circle_selected: "#000000",
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

/// Named palette selector, parseable from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// The palette this selector names.
    pub fn palette(self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::DARK,
            ThemeKind::Light => Theme::LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_parses_lowercase_names() {
        assert_eq!(ThemeKind::from_str("dark").unwrap(), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_str("light").unwrap(), ThemeKind::Light);
        assert!(ThemeKind::from_str("sepia").is_err());
    }

    #[test]
    fn kind_resolves_to_its_palette() {
        assert_eq!(ThemeKind::Light.palette(), Theme::LIGHT);
        assert_eq!(ThemeKind::default().palette(), Theme::DARK);
    }
}
