use std::{fmt, str::FromStr};

use gpui::{Rgba, SharedString};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deserializers::de_non_empty_colors;
use crate::theme::{ThemeError, ThemeMode};

/// A named color group that a [`ColorRef`] can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    Primary,
    Secondary,
    Success,
    Warning,
    Error,
    Info,
    Neutral,
    Bg,
    Text,
    Border,
    Chart,
    Social,
    Sentiment,
    Shadow,
}

impl ColorGroup {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "info" => Self::Info,
            "neutral" => Self::Neutral,
            "bg" => Self::Bg,
            "text" => Self::Text,
            "border" => Self::Border,
            "chart" => Self::Chart,
            "social" => Self::Social,
            "sentiment" => Self::Sentiment,
            "shadow" => Self::Shadow,
            _ => return None,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Neutral => "neutral",
            Self::Bg => "bg",
            Self::Text => "text",
            Self::Border => "border",
            Self::Chart => "chart",
            Self::Social => "social",
            Self::Sentiment => "sentiment",
            Self::Shadow => "shadow",
        }
    }

    fn is_scale(&self) -> bool {
        matches!(
            self,
            Self::Primary
                | Self::Secondary
                | Self::Success
                | Self::Warning
                | Self::Error
                | Self::Info
                | Self::Neutral
        )
    }
}

/// A reference to a color role, written the way it is used in the token
/// table: `primary-500`, `bg-card`, `chart-3`, `sentiment-positive`, `shadow`.
///
/// The group and key syntax are checked when parsing. Whether the key exists
/// is only known once it is resolved against a [`ThemeColors`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorRef {
    group: ColorGroup,
    key: SharedString,
}

impl ColorRef {
    /// The variant's shadow color.
    pub fn shadow() -> Self {
        Self {
            group: ColorGroup::Shadow,
            key: SharedString::new_static(""),
        }
    }

    pub fn group(&self) -> ColorGroup {
        self.group
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for ColorRef {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ThemeError::InvalidColorReference(s.to_string());

        let (group_name, key) = match s.split_once('-') {
            Some((group_name, key)) => (group_name, key),
            None => (s, ""),
        };

        let group = ColorGroup::from_name(group_name).ok_or_else(invalid)?;

        match group {
            ColorGroup::Shadow if !key.is_empty() => return Err(invalid()),
            ColorGroup::Shadow => {}
            _ if key.is_empty() => return Err(invalid()),
            ColorGroup::Chart => {
                key.parse::<usize>().map_err(|_| invalid())?;
            }
            group if group.is_scale() => {
                key.parse::<u16>().map_err(|_| invalid())?;
            }
            _ => {}
        }

        Ok(Self {
            group,
            key: SharedString::from(key.to_string()),
        })
    }
}

impl TryFrom<String> for ColorRef {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorRef> for String {
    fn from(value: ColorRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            f.write_str(self.group.name())
        } else {
            write!(f, "{}-{}", self.group.name(), self.key)
        }
    }
}

/// A Tailwind-style shade scale. The 950 shade is optional.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ColorScale {
    #[serde(rename = "50")]
    pub s50: Rgba,
    #[serde(rename = "100")]
    pub s100: Rgba,
    #[serde(rename = "200")]
    pub s200: Rgba,
    #[serde(rename = "300")]
    pub s300: Rgba,
    #[serde(rename = "400")]
    pub s400: Rgba,
    #[serde(rename = "500")]
    pub s500: Rgba,
    #[serde(rename = "600")]
    pub s600: Rgba,
    #[serde(rename = "700")]
    pub s700: Rgba,
    #[serde(rename = "800")]
    pub s800: Rgba,
    #[serde(rename = "900")]
    pub s900: Rgba,
    #[serde(rename = "950", default, skip_serializing_if = "Option::is_none")]
    pub s950: Option<Rgba>,
}

impl ColorScale {
    pub fn shade(&self, shade: u16) -> Option<Rgba> {
        Some(match shade {
            50 => self.s50,
            100 => self.s100,
            200 => self.s200,
            300 => self.s300,
            400 => self.s400,
            500 => self.s500,
            600 => self.s600,
            700 => self.s700,
            800 => self.s800,
            900 => self.s900,
            950 => return self.s950,
            _ => return None,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeColors {
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub success: ColorScale,
    pub warning: ColorScale,
    pub error: ColorScale,
    pub info: ColorScale,
    pub neutral: ColorScale,
    pub bg: ThemeBackgroundColors,
    pub text: ThemeTextColors,
    pub border: ThemeBorderColors,
    #[serde(deserialize_with = "de_non_empty_colors")]
    pub chart: SmallVec<[Rgba; 10]>,
    pub social: ThemeSocialColors,
    pub sentiment: ThemeSentimentColors,
    pub shadow: ThemeShadowColor,
}

impl ThemeColors {
    fn scale(&self, group: ColorGroup) -> Option<&ColorScale> {
        Some(match group {
            ColorGroup::Primary => &self.primary,
            ColorGroup::Secondary => &self.secondary,
            ColorGroup::Success => &self.success,
            ColorGroup::Warning => &self.warning,
            ColorGroup::Error => &self.error,
            ColorGroup::Info => &self.info,
            ColorGroup::Neutral => &self.neutral,
            _ => return None,
        })
    }

    fn lookup(&self, color: &ColorRef) -> Option<Rgba> {
        let key = color.key();

        match color.group {
            ColorGroup::Bg => self.bg.get(key),
            ColorGroup::Text => self.text.get(key),
            ColorGroup::Border => self.border.get(key),
            ColorGroup::Social => self.social.get(key),
            ColorGroup::Sentiment => self.sentiment.get(key),
            ColorGroup::Shadow => Some(self.shadow.color),
            ColorGroup::Chart => {
                let index = key.parse::<usize>().ok()?;
                self.chart.get(index.checked_sub(1)?).copied()
            }
            group => self.scale(group)?.shade(key.parse().ok()?),
        }
    }

    /// Resolves a color reference against these colors.
    ///
    /// `mode` is only used to describe the failure.
    pub fn resolve(&self, color: &ColorRef, mode: ThemeMode) -> Result<Rgba, ThemeError> {
        self.lookup(color).ok_or_else(|| ThemeError::UnknownColor {
            reference: color.to_string(),
            mode,
        })
    }
}

macro_rules! color_roles {
    ( $( $(#[$meta:meta])* $name:ident { $( $field:ident => $key:literal ),+ $(,)? } )+ ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Serialize, Deserialize, Clone)]
            pub struct $name {
                $( pub $field: Rgba, )+
            }

            impl $name {
                /// Looks a role up by the name used in color references.
                pub fn get(&self, key: &str) -> Option<Rgba> {
                    match key {
                        $( $key => Some(self.$field), )+
                        _ => None,
                    }
                }
            }
        )+
    };
}

color_roles! {
    /// Surface colors, from the page background up to overlays.
    ThemeBackgroundColors {
        primary => "primary",
        secondary => "secondary",
        tertiary => "tertiary",
        card => "card",
        sidebar => "sidebar",
        header => "header",
        modal => "modal",
        overlay => "overlay",
    }

    ThemeTextColors {
        primary => "primary",
        secondary => "secondary",
        tertiary => "tertiary",
        muted => "muted",
        accent => "accent",
        inverse => "inverse",
    }

    ThemeBorderColors {
        primary => "primary",
        secondary => "secondary",
        accent => "accent",
        focus => "focus",
    }

    ThemeSocialColors {
        twitter => "twitter",
        verified => "verified",
        bot => "bot",
        influencer => "influencer",
    }

    ThemeSentimentColors {
        positive => "positive",
        negative => "negative",
        neutral => "neutral",
    }
}

/// The color shadows are cast in, with the opacity used at each elevation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeShadowColor {
    pub color: Rgba,
    pub opacity: ThemeShadowOpacity,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeShadowOpacity {
    pub sm: f32,
    pub base: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}
