#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::{
    Hsla, IntoElement, Length, RenderOnce, SharedString, SizeRefinement, Styled,
    prelude::FluentBuilder, px, svg,
};

use crate::theme::ThemeTextKind;

/// Icons bundled with the crate, see [`BundledAssets`](crate::BundledAssets).
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn path(&self) -> SharedString)]
pub enum IconKind {
    #[assoc(path = "icons/sun.svg".into())]
    Sun,

    #[assoc(path = "icons/moon.svg".into())]
    Moon,

    /// Marks the selected option.
    #[assoc(path = "icons/checkmark.svg".into())]
    Checkmark,
}

impl From<IconKind> for SharedString {
    fn from(kind: IconKind) -> Self {
        kind.path()
    }
}

/// An SVG icon, drawn in the primary text color unless given one.
#[derive(IntoElement, Clone)]
pub struct Icon {
    path: SharedString,
    pub(crate) size: SizeRefinement<Length>,
    color: Option<Hsla>,
}

impl Icon {
    /// Creates a new icon from an SVG asset path or an [`IconKind`].
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            size: SizeRefinement::default(),
            color: None,
        }
    }

    /// Sets uniform width and height for the icon.
    pub fn size(mut self, size: impl Into<Length>) -> Self {
        let size = size.into();
        self.size = SizeRefinement {
            width: Some(size),
            height: Some(size),
        };
        self
    }

    /// Sets a custom color, overriding the theme's primary text color.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let primary_text_color = ThemeTextKind::Primary.resolve(cx);
        let width = self.size.width.unwrap_or(px(14.).into());
        let height = self.size.height.unwrap_or(px(14.).into());

        svg()
            .path(self.path)
            .flex_none()
            .text_color(primary_text_color)
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .when_some(self.color, |this, color| this.text_color(color))
    }
}
