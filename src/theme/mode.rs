#![allow(missing_docs)] // Derive macros generate undocumented methods.

use std::{fmt, str::FromStr};

use enum_assoc::Assoc;
use gpui::{Rgba, WindowAppearance};
use serde::{Deserialize, Serialize};

use crate::{components::IconKind, theme::ThemeError, utils::rgb_a};

/// The display mode of the interface. There are exactly two.
///
/// The associated functions form the static option table shown by the
/// theme selector: label, glyph, icon, description and preview colors.
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[func(pub fn as_str(&self) -> &'static str)]
#[func(pub fn label(&self) -> &'static str)]
#[func(pub fn glyph(&self) -> &'static str)]
#[func(pub fn icon(&self) -> IconKind)]
#[func(pub fn description(&self) -> &'static str)]
#[func(pub fn preview_background(&self) -> Rgba)]
#[func(pub fn preview_border(&self) -> Rgba)]
pub enum ThemeMode {
    #[assoc(as_str = "light")]
    #[assoc(label = "Light")]
    #[assoc(glyph = "☀️")]
    #[assoc(icon = IconKind::Sun)]
    #[assoc(description = "Clean and bright interface")]
    #[assoc(preview_background = rgb_a(0xFFFFFF, 1.))]
    #[assoc(preview_border = rgb_a(0xE5E7EB, 1.))]
    Light,

    #[assoc(as_str = "dark")]
    #[assoc(label = "Dark")]
    #[assoc(glyph = "🌙")]
    #[assoc(icon = IconKind::Moon)]
    #[assoc(description = "Easy on the eyes")]
    #[assoc(preview_background = rgb_a(0x111827, 1.))]
    #[assoc(preview_border = rgb_a(0x374151, 1.))]
    Dark,
}

impl ThemeMode {
    /// Every mode, in the order they are offered to the user.
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ThemeError::UnknownMode(other.to_string())),
        }
    }
}

impl From<WindowAppearance> for ThemeMode {
    fn from(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Dark | WindowAppearance::VibrantDark => ThemeMode::Dark,
            WindowAppearance::Light | WindowAppearance::VibrantLight => ThemeMode::Light,
        }
    }
}
