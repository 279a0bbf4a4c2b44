use std::cmp::Ordering;

use gpui::{AbsoluteLength, Background, Pixels, SharedString, linear_color_stop, linear_gradient};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::deserializers::{de_length_map, de_pixels_map};
use crate::theme::{
    AnimationToken, ColorRef, ComponentStyle, KeyframeTrack, ShadowToken, ThemeError,
    ThemeVariant,
};

/// Mode independent design tokens. Colors inside them are references that
/// are resolved against a [`ThemeVariant`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTokens {
    #[serde(deserialize_with = "de_length_map")]
    pub spacing: IndexMap<SharedString, AbsoluteLength>,
    pub shadows: IndexMap<SharedString, ShadowToken>,
    pub animations: IndexMap<SharedString, AnimationToken>,
    pub keyframes: IndexMap<SharedString, KeyframeTrack>,
    #[serde(deserialize_with = "de_pixels_map")]
    pub backdrop_blur: IndexMap<SharedString, Pixels>,
    pub gradients: IndexMap<SharedString, GradientToken>,
    /// Minimum window widths, smallest first.
    #[serde(deserialize_with = "de_pixels_map")]
    pub screens: IndexMap<SharedString, Pixels>,
    /// Paint priorities for deferred layers.
    pub z_index: IndexMap<SharedString, usize>,
    pub components: IndexMap<SharedString, ComponentStyle>,
}

impl ThemeTokens {
    pub fn spacing(&self, name: &str) -> Result<AbsoluteLength, ThemeError> {
        self.spacing
            .get(name)
            .copied()
            .ok_or_else(|| ThemeError::UnknownSpacing(name.to_string()))
    }

    pub fn shadow(&self, name: &str) -> Result<&ShadowToken, ThemeError> {
        self.shadows
            .get(name)
            .ok_or_else(|| ThemeError::UnknownShadow(name.to_string()))
    }

    pub fn animation(&self, name: &str) -> Result<&AnimationToken, ThemeError> {
        self.animations
            .get(name)
            .ok_or_else(|| ThemeError::UnknownAnimation(name.to_string()))
    }

    /// The keyframe track an animation plays.
    pub fn keyframes_for(&self, animation: &AnimationToken) -> Result<&KeyframeTrack, ThemeError> {
        self.keyframes
            .get(&animation.keyframes)
            .ok_or_else(|| ThemeError::UnknownKeyframes(animation.keyframes.to_string()))
    }

    pub fn blur(&self, name: &str) -> Result<Pixels, ThemeError> {
        self.backdrop_blur
            .get(name)
            .copied()
            .ok_or_else(|| ThemeError::UnknownBlur(name.to_string()))
    }

    pub fn breakpoint(&self, name: &str) -> Result<Pixels, ThemeError> {
        self.screens
            .get(name)
            .copied()
            .ok_or_else(|| ThemeError::UnknownBreakpoint(name.to_string()))
    }

    /// The widest breakpoint a window of `width` reaches, if any.
    pub fn active_breakpoint(&self, width: Pixels) -> Option<&SharedString> {
        self.screens
            .iter()
            .filter(|(_, min_width)| width >= **min_width)
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(name, _)| name)
    }

    /// Whether a window of `width` is at or above the named breakpoint.
    pub fn is_at_least(&self, name: &str, width: Pixels) -> Result<bool, ThemeError> {
        Ok(width >= self.breakpoint(name)?)
    }

    pub fn z_index(&self, name: &str) -> Result<usize, ThemeError> {
        self.z_index
            .get(name)
            .copied()
            .ok_or_else(|| ThemeError::UnknownZIndex(name.to_string()))
    }

    pub fn gradient(&self, name: &str) -> Result<&GradientToken, ThemeError> {
        self.gradients
            .get(name)
            .ok_or_else(|| ThemeError::UnknownGradient(name.to_string()))
    }

    pub fn component(&self, name: &str) -> Result<&ComponentStyle, ThemeError> {
        self.components
            .get(name)
            .ok_or_else(|| ThemeError::UnknownComponentStyle(name.to_string()))
    }
}

fn default_angle() -> f32 {
    180.
}

/// A two stop linear gradient.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GradientToken {
    pub from: ColorRef,
    pub to: ColorRef,
    /// Degrees, CSS style: 180 runs top to bottom.
    #[serde(default = "default_angle")]
    pub angle: f32,
}

impl GradientToken {
    pub fn resolve(&self, variant: &ThemeVariant) -> Result<Background, ThemeError> {
        let from = variant.colors.resolve(&self.from, variant.kind)?;
        let to = variant.colors.resolve(&self.to, variant.kind)?;

        Ok(linear_gradient(
            self.angle,
            linear_color_stop(from, 0.),
            linear_color_stop(to, 1.),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeMode};
    use gpui::{px, rems};
    use std::time::Duration;

    #[test]
    fn test_spacing_extensions() {
        let theme = Theme::DEFAULT;
        let tokens = &theme.tokens;

        assert_eq!(tokens.spacing("18").unwrap(), AbsoluteLength::Rems(rems(4.5)));
        assert_eq!(tokens.spacing("88").unwrap(), AbsoluteLength::Rems(rems(22.)));
        assert_eq!(tokens.spacing("128").unwrap(), AbsoluteLength::Rems(rems(32.)));
        assert!(matches!(tokens.spacing("17"), Err(ThemeError::UnknownSpacing(_))));
    }

    #[test]
    fn test_breakpoints() {
        let theme = Theme::DEFAULT;
        let tokens = &theme.tokens;

        assert_eq!(tokens.breakpoint("sm").unwrap(), px(640.));
        assert_eq!(tokens.breakpoint("3xl").unwrap(), px(1920.));

        assert_eq!(tokens.active_breakpoint(px(300.)), None);
        assert_eq!(tokens.active_breakpoint(px(640.)).map(|s| s.as_ref()), Some("sm"));
        assert_eq!(tokens.active_breakpoint(px(1100.)).map(|s| s.as_ref()), Some("lg"));
        assert_eq!(tokens.active_breakpoint(px(4000.)).map(|s| s.as_ref()), Some("3xl"));

        assert!(!tokens.is_at_least("sm", px(639.)).unwrap());
        assert!(tokens.is_at_least("sm", px(640.)).unwrap());
        assert!(matches!(
            tokens.is_at_least("4xl", px(640.)),
            Err(ThemeError::UnknownBreakpoint(_))
        ));
    }

    #[test]
    fn test_z_index_layers_are_ordered() {
        let theme = Theme::DEFAULT;
        let tokens = &theme.tokens;

        let order = ["dropdown", "sticky", "fixed", "modal-backdrop", "modal", "popover", "tooltip", "toast"]
            .map(|name| tokens.z_index(name).unwrap());

        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(tokens.z_index("modal").unwrap(), 1050);
        assert!(matches!(tokens.z_index("top"), Err(ThemeError::UnknownZIndex(_))));
    }

    #[test]
    fn test_animation_tokens_resolve() {
        let theme = Theme::DEFAULT;
        let tokens = &theme.tokens;

        let fade_in = tokens.animation("fade-in").unwrap();
        assert_eq!(fade_in.duration, Duration::from_millis(500));
        assert_eq!(tokens.keyframes_for(fade_in).unwrap().sample(0.).opacity, 0.);

        let spin = tokens.animation("spin-slow").unwrap();
        assert!(!spin.to_animation().oneshot);

        for animation in tokens.animations.values() {
            tokens.keyframes_for(animation).unwrap();
        }

        assert!(matches!(tokens.animation("wiggle"), Err(ThemeError::UnknownAnimation(_))));
    }

    #[test]
    fn test_blur_and_gradients() {
        let theme = Theme::DEFAULT;
        let tokens = &theme.tokens;

        assert_eq!(tokens.blur("md").unwrap(), px(8.));
        assert_eq!(tokens.blur("3xl").unwrap(), px(40.));

        let analytics = tokens.gradient("analytics").unwrap();
        assert_eq!(analytics.from.to_string(), "primary-500");
        assert_eq!(analytics.to.to_string(), "secondary-500");

        for mode in ThemeMode::ALL {
            analytics.resolve(theme.variants.get(mode)).unwrap();
        }

        assert!(matches!(tokens.gradient("rainbow"), Err(ThemeError::UnknownGradient(_))));
    }
}
