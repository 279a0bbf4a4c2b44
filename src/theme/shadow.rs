use gpui::{BoxShadow, Hsla, Pixels, point};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deserializers::de_pixels;
use crate::{
    theme::{ColorRef, ThemeError, ThemeVariant},
    utils::RgbaExt,
};

/// Elevation levels whose opacity is defined per variant.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShadowLevel {
    Sm,
    Base,
    Md,
    Lg,
    Xl,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum ShadowOpacity {
    Level(ShadowLevel),
    Fixed(f32),
}

/// One layer of a box shadow.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShadowLayer {
    #[serde(default, deserialize_with = "de_pixels")]
    pub x: Pixels,
    #[serde(default, deserialize_with = "de_pixels")]
    pub y: Pixels,
    #[serde(default, deserialize_with = "de_pixels")]
    pub blur: Pixels,
    #[serde(default, deserialize_with = "de_pixels")]
    pub spread: Pixels,
    pub opacity: ShadowOpacity,
    #[serde(default = "ColorRef::shadow")]
    pub color: ColorRef,
    /// Inset layers are kept in the table but cannot be drawn by gpui and are
    /// skipped when resolving.
    #[serde(default)]
    pub inset: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct ShadowToken {
    pub layers: SmallVec<[ShadowLayer; 2]>,
}

impl ShadowToken {
    /// Resolves the drawable layers of this shadow against a variant's colors.
    pub fn resolve(&self, variant: &ThemeVariant) -> Result<SmallVec<[BoxShadow; 2]>, ThemeError> {
        let opacities = &variant.colors.shadow.opacity;

        self.layers
            .iter()
            .filter(|layer| !layer.inset)
            .map(|layer| {
                let opacity = match layer.opacity {
                    ShadowOpacity::Fixed(opacity) => opacity,
                    ShadowOpacity::Level(ShadowLevel::Sm) => opacities.sm,
                    ShadowOpacity::Level(ShadowLevel::Base) => opacities.base,
                    ShadowOpacity::Level(ShadowLevel::Md) => opacities.md,
                    ShadowOpacity::Level(ShadowLevel::Lg) => opacities.lg,
                    ShadowOpacity::Level(ShadowLevel::Xl) => opacities.xl,
                };

                let color = variant.colors.resolve(&layer.color, variant.kind)?;

                Ok(BoxShadow {
                    color: Hsla::from(color.alpha(opacity)),
                    offset: point(layer.x, layer.y),
                    blur_radius: layer.blur,
                    spread_radius: layer.spread,
                })
            })
            .collect()
    }
}
