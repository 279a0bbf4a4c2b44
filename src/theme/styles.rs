use gpui::{
    AbsoluteLength, BoxShadow, CursorStyle, EdgesRefinement, FontWeight, Hsla, InteractiveElement,
    Pixels, SharedString, StyleRefinement, Styled,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deserializers::de_pixels;
use crate::{
    theme::{ColorRef, Offset, Theme, ThemeError, ThemeVariant},
    utils::RgbaExt,
};

/// A color reference, optionally faded.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ColorToken {
    Solid(ColorRef),
    Faded { color: ColorRef, opacity: f32 },
}

impl ColorToken {
    pub fn resolve(&self, variant: &ThemeVariant) -> Result<Hsla, ThemeError> {
        Ok(match self {
            ColorToken::Solid(color) => variant.colors.resolve(color, variant.kind)?.into(),
            ColorToken::Faded { color, opacity } => variant
                .colors
                .resolve(color, variant.kind)?
                .alpha(*opacity)
                .into(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BorderToken {
    #[serde(deserialize_with = "de_pixels")]
    pub width: Pixels,
    pub color: ColorToken,
}

/// A named composition of tokens, like `analytics-card` or `btn-primary`.
///
/// Radius, padding, shadow and blur are token names looked up in the theme.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ComponentStyle {
    #[serde(default)]
    pub background: Option<ColorToken>,
    #[serde(default)]
    pub text: Option<ColorToken>,
    #[serde(default)]
    pub border: Option<BorderToken>,
    #[serde(default)]
    pub radius: Option<SharedString>,
    #[serde(default)]
    pub padding_x: Option<SharedString>,
    #[serde(default)]
    pub padding_y: Option<SharedString>,
    #[serde(default)]
    pub shadow: Option<SharedString>,
    #[serde(default)]
    pub backdrop_blur: Option<SharedString>,
    #[serde(default)]
    pub font_weight: Option<f32>,
    #[serde(default)]
    pub full_width: bool,
    #[serde(default)]
    pub hover: Option<ComponentStyleOverride>,
    #[serde(default)]
    pub focus: Option<ComponentStyleOverride>,
    #[serde(default)]
    pub disabled: Option<ComponentStyleOverride>,
}

/// The properties a state (hover, focus, disabled) may replace.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ComponentStyleOverride {
    #[serde(default)]
    pub background: Option<ColorToken>,
    #[serde(default)]
    pub border_color: Option<ColorToken>,
    #[serde(default)]
    pub shadow: Option<SharedString>,
    #[serde(default)]
    pub translate_y: Option<Offset>,
    #[serde(default)]
    pub opacity: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedComponentStyle {
    pub background: Option<Hsla>,
    pub text: Option<Hsla>,
    pub border_width: Option<Pixels>,
    pub border_color: Option<Hsla>,
    pub radius: Option<Pixels>,
    pub padding_x: Option<AbsoluteLength>,
    pub padding_y: Option<AbsoluteLength>,
    pub shadow: SmallVec<[BoxShadow; 2]>,
    /// gpui has no backdrop filter, the radius is kept for callers that
    /// draw their own blur.
    pub backdrop_blur: Option<Pixels>,
    pub font_weight: Option<FontWeight>,
    pub full_width: bool,
    pub hover: Option<ResolvedStyleOverride>,
    pub focus: Option<ResolvedStyleOverride>,
    pub disabled: Option<ResolvedStyleOverride>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedStyleOverride {
    pub background: Option<Hsla>,
    pub border_color: Option<Hsla>,
    pub shadow: Option<SmallVec<[BoxShadow; 2]>>,
    pub translate_y: Option<Pixels>,
    pub opacity: Option<f32>,
}

fn resolve_color(
    color: &Option<ColorToken>,
    variant: &ThemeVariant,
) -> Result<Option<Hsla>, ThemeError> {
    color.as_ref().map(|color| color.resolve(variant)).transpose()
}

fn resolve_shadow(
    name: &Option<SharedString>,
    theme: &Theme,
    variant: &ThemeVariant,
) -> Result<Option<SmallVec<[BoxShadow; 2]>>, ThemeError> {
    name.as_ref()
        .map(|name| theme.tokens.shadow(name)?.resolve(variant))
        .transpose()
}

impl ComponentStyleOverride {
    pub fn resolve(
        &self,
        theme: &Theme,
        variant: &ThemeVariant,
    ) -> Result<ResolvedStyleOverride, ThemeError> {
        Ok(ResolvedStyleOverride {
            background: resolve_color(&self.background, variant)?,
            border_color: resolve_color(&self.border_color, variant)?,
            shadow: resolve_shadow(&self.shadow, theme, variant)?,
            // Relative offsets have nothing to be relative to here.
            translate_y: self.translate_y.map(|offset| offset.pixels),
            opacity: self.opacity,
        })
    }
}

impl ComponentStyle {
    /// Looks every token up and resolves every color against `variant`.
    pub fn resolve(
        &self,
        theme: &Theme,
        variant: &ThemeVariant,
    ) -> Result<ResolvedComponentStyle, ThemeError> {
        let tokens = &theme.tokens;

        let resolve_override = |state: &Option<ComponentStyleOverride>| {
            state
                .as_ref()
                .map(|state| state.resolve(theme, variant))
                .transpose()
        };

        Ok(ResolvedComponentStyle {
            background: resolve_color(&self.background, variant)?,
            text: resolve_color(&self.text, variant)?,
            border_width: self.border.as_ref().map(|border| border.width),
            border_color: self
                .border
                .as_ref()
                .map(|border| border.color.resolve(variant))
                .transpose()?,
            radius: self
                .radius
                .as_ref()
                .map(|name| theme.layout.corner_radii.get(name))
                .transpose()?,
            padding_x: self
                .padding_x
                .as_ref()
                .map(|name| tokens.spacing(name))
                .transpose()?,
            padding_y: self
                .padding_y
                .as_ref()
                .map(|name| tokens.spacing(name))
                .transpose()?,
            shadow: resolve_shadow(&self.shadow, theme, variant)?.unwrap_or_default(),
            backdrop_blur: self
                .backdrop_blur
                .as_ref()
                .map(|name| tokens.blur(name))
                .transpose()?,
            font_weight: self.font_weight.map(FontWeight),
            full_width: self.full_width,
            hover: resolve_override(&self.hover)?,
            focus: resolve_override(&self.focus)?,
            disabled: resolve_override(&self.disabled)?,
        })
    }
}

/// The interaction state a component style is applied in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentState {
    pub focused: bool,
    pub disabled: bool,
}

fn apply_override<S: Styled>(mut this: S, state: &ResolvedStyleOverride) -> S {
    if let Some(background) = state.background {
        this = this.bg(background);
    }
    if let Some(border_color) = state.border_color {
        this = this.border_color(border_color);
    }
    if let Some(shadow) = &state.shadow {
        this = this.shadow(shadow.to_vec());
    }
    if let Some(translate_y) = state.translate_y {
        this = this.relative().top(translate_y);
    }
    if let Some(opacity) = state.opacity {
        this = this.opacity(opacity);
    }
    this
}

/// Applies a resolved [`ComponentStyle`] to an element.
pub trait ComponentStyled: Styled + InteractiveElement + Sized {
    fn component_style(mut self, style: &ResolvedComponentStyle, state: ComponentState) -> Self {
        if let Some(background) = style.background {
            self = self.bg(background);
        }
        if let Some(text) = style.text {
            self = self.text_color(text);
        }
        if let Some(width) = style.border_width {
            let width = Some(AbsoluteLength::Pixels(width));
            self.style().border_widths = EdgesRefinement {
                top: width,
                right: width,
                bottom: width,
                left: width,
            };
        }
        if let Some(border_color) = style.border_color {
            self = self.border_color(border_color);
        }
        if let Some(radius) = style.radius {
            self = self.rounded(radius);
        }
        if let Some(padding_x) = style.padding_x {
            self = self.px(padding_x);
        }
        if let Some(padding_y) = style.padding_y {
            self = self.py(padding_y);
        }
        if !style.shadow.is_empty() {
            self = self.shadow(style.shadow.to_vec());
        }
        if let Some(font_weight) = style.font_weight {
            self = self.font_weight(font_weight);
        }
        if style.full_width {
            self = self.w_full();
        }

        if state.disabled {
            self = self.cursor(CursorStyle::OperationNotAllowed);
            if let Some(disabled) = &style.disabled {
                self = apply_override(self, disabled);
            }
            return self;
        }

        if state.focused
            && let Some(focus) = &style.focus
        {
            self = apply_override(self, focus);
        }

        if let Some(hover) = style.hover.clone() {
            self = self.hover(move |this: StyleRefinement| apply_override(this, &hover));
        }

        self
    }
}

impl<E: Styled + InteractiveElement> ComponentStyled for E {}
