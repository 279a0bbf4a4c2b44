use std::{
    ops::{Deref, DerefMut},
    path::Path,
    sync::LazyLock,
};

use gpui::{AbsoluteLength, App, DefiniteLength, Global, Pixels, SharedString};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deserializers::{
    de_abs_length, de_def_length, de_pixels, de_string_or_non_empty_list, de_variants,
};
use crate::theme::{ThemeColors, ThemeError, ThemeMode, ThemeTokens};

/// A complete design-token table: layout scales, mode independent tokens and
/// one color variant per [`ThemeMode`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Theme {
    pub name: SharedString,
    pub layout: ThemeLayout,
    pub tokens: ThemeTokens,
    pub variants: ThemeVariants,
}

macro_rules! generate_builtin_themes {
    ( $( [$path:literal, $name:ident] ),+ ) => {
        $(
            pub const $name: LazyLockTheme = LazyLockTheme::new(|| {
                Theme::from_string(include_str!($path))
                    .unwrap_or_else(|err| panic!("built-in theme {} is invalid: {err}", $path))
            });
        )+
    };
}

pub struct LazyLockTheme(LazyLock<Theme>);

impl LazyLockTheme {
    #[inline(always)]
    const fn new(f: fn() -> Theme) -> Self {
        Self(LazyLock::new(f))
    }
}

impl Deref for LazyLockTheme {
    type Target = Theme;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LazyLockTheme {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<Theme> for LazyLockTheme {
    fn as_ref(&self) -> &Theme {
        &self.0
    }
}

impl AsRef<Theme> for Theme {
    fn as_ref(&self) -> &Theme {
        self
    }
}

impl Theme {
    generate_builtin_themes!(["../../themes/default.json", DEFAULT]);

    /// Parses and validates a theme from JSON.
    pub fn from_string<S: AsRef<str>>(str: S) -> Result<Theme, ThemeError> {
        let theme: Theme = serde_json::from_str(str.as_ref())?;
        theme.validate()?;
        Ok(theme)
    }

    /// Reads, parses and validates a theme file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Theme, ThemeError> {
        let theme = Self::from_string(std::fs::read_to_string(path.as_ref())?)?;
        log::info!(
            "loaded theme \"{}\" from {}",
            theme.name,
            path.as_ref().display()
        );
        Ok(theme)
    }

    /// Checks that every token reference in the table resolves in both variants.
    pub fn validate(&self) -> Result<(), ThemeError> {
        for animation in self.tokens.animations.values() {
            self.tokens.keyframes_for(animation)?;
        }

        for variant in self.variants.iter() {
            for shadow in self.tokens.shadows.values() {
                shadow.resolve(variant)?;
            }

            for gradient in self.tokens.gradients.values() {
                gradient.resolve(variant)?;
            }

            for style in self.tokens.components.values() {
                style.resolve(self, variant)?;
            }
        }

        Ok(())
    }
}

impl Global for Theme {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeLayout {
    pub text: ThemeText,
    pub corner_radii: ThemeCornerRadii,
    pub size: ThemeSize,
    pub padding: ThemePadding,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeText {
    #[serde(deserialize_with = "de_pixels")]
    pub base_size: Pixels,
    pub default_font: ThemeFont,
    pub display_font: ThemeFont,
    pub mono_font: ThemeFont,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeFont {
    /// Font families in fallback order.
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub family: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_def_length")]
    pub line_height: DefiniteLength,
    pub sizes: ThemeTextSizes,
    pub weights: ThemeTextWeights,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextSizes {
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_xl: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_lg: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_md: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_sm: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub body: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub caption: AbsoluteLength,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextWeights {
    pub heading_xl: f32,
    pub heading_lg: f32,
    pub heading_md: f32,
    pub heading_sm: f32,
    pub body: f32,
    pub caption: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeCornerRadii {
    #[serde(deserialize_with = "de_pixels")]
    pub xs: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
    #[serde(rename = "DEFAULT", deserialize_with = "de_pixels")]
    pub base: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(rename = "2xl", deserialize_with = "de_pixels")]
    pub xxl: Pixels,
    #[serde(rename = "3xl", deserialize_with = "de_pixels")]
    pub xxxl: Pixels,
}

impl ThemeCornerRadii {
    /// Looks a radius up by its token name (`sm`, `DEFAULT`, `2xl`, ...).
    pub fn get(&self, name: &str) -> Result<Pixels, ThemeError> {
        Ok(match name {
            "xs" => self.xs,
            "sm" => self.sm,
            "DEFAULT" => self.base,
            "md" => self.md,
            "lg" => self.lg,
            "xl" => self.xl,
            "2xl" => self.xxl,
            "3xl" => self.xxxl,
            _ => return Err(ThemeError::UnknownRadius(name.to_string())),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeSize {
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemePadding {
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
}

/// The color variants of a theme. Holds exactly one variant per mode.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct ThemeVariants {
    #[serde(deserialize_with = "de_variants")]
    variants: SmallVec<[ThemeVariant; 2]>,
}

impl ThemeVariants {
    /// The variant for `mode`.
    pub fn get(&self, mode: ThemeMode) -> &ThemeVariant {
        // Deserialization guarantees both modes are present.
        self.variants
            .iter()
            .find(|variant| variant.kind == mode)
            .unwrap_or(&self.variants[0])
    }

    /// The variant for the mode currently published by the theme state.
    pub fn active(&self, cx: &App) -> &ThemeVariant {
        self.get(
            cx.try_global::<ActiveThemeMode>()
                .copied()
                .unwrap_or_default()
                .0,
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeVariant> {
        self.variants.iter()
    }
}

/// The mode whose variant themed components render with.
///
/// Kept in sync with the installed [`ThemeState`](crate::theme::ThemeState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveThemeMode(pub ThemeMode);

impl Default for ActiveThemeMode {
    fn default() -> Self {
        Self(ThemeMode::Light)
    }
}

impl Global for ActiveThemeMode {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeVariant {
    pub kind: ThemeMode,
    pub colors: ThemeColors,
}
