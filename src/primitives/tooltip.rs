use gpui::{
    AnyView, App, AppContext, Context, IntoElement, Render, SharedString, Window, div, prelude::*,
    px,
};

use crate::theme::{
    ThemeBackgroundKind, ThemeBorderKind, ThemeLayoutCornerRadiiKind, ThemeLayoutPaddingKind,
    ThemeTextKind, ThemeTextSizeKind,
};

/// A small floating label with one or more lines of text.
pub struct Tooltip {
    lines: Vec<SharedString>,
}

impl Tooltip {
    pub fn new(lines: impl IntoIterator<Item = SharedString>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    /// Builds the view handed to `StatefulInteractiveElement::tooltip`.
    pub fn view(lines: impl IntoIterator<Item = SharedString>, cx: &mut App) -> AnyView {
        let tooltip = Self::new(lines);
        cx.new(|_cx| tooltip).into()
    }
}

impl Render for Tooltip {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let background = ThemeBackgroundKind::Modal.resolve(cx);
        let border = ThemeBorderKind::Primary.resolve(cx);
        let text = ThemeTextKind::Primary.resolve(cx);
        let radius = ThemeLayoutCornerRadiiKind::Md.resolve(cx);
        let padding = ThemeLayoutPaddingKind::Lg.resolve(cx);
        let text_size = ThemeTextSizeKind::Caption.resolve(cx);

        div()
            .flex()
            .flex_col()
            .px(padding)
            .py(px(4.))
            .rounded(radius)
            .bg(background)
            .border_1()
            .border_color(border)
            .text_color(text)
            .text_size(text_size)
            .children(self.lines.iter().cloned())
    }
}
