use gpui::{
    App, ElementId, Entity, InteractiveElement, IntoElement, ParentElement, Refineable,
    RenderOnce, SharedString, StatefulInteractiveElement, StyleRefinement, Styled, div,
    prelude::FluentBuilder,
};

use crate::{
    ElementIdExt,
    components::{Icon, IconKind, Switch},
    primitives::{Clickable, Tooltip},
    theme::{ThemeExt, ThemeLayerKind, ThemeMode, ThemeState, ThemeStatusKind},
};

/// Describes what activating the toggle does, naming the theme it switches to.
pub fn accessible_label(is_dark: bool) -> &'static str {
    if is_dark {
        "Switch to light theme"
    } else {
        "Switch to dark theme"
    }
}

pub fn title(mode: ThemeMode) -> SharedString {
    format!("Current theme: {mode}").into()
}

/// Flips the theme once.
pub fn activate(state: &Entity<ThemeState>, cx: &mut App) {
    state.update(cx, |state, cx| state.toggle_theme(cx));
}

/// A switch that flips between the light and dark theme.
///
/// The knob sits on the sun while light and slides to the moon when dark.
#[derive(IntoElement)]
pub struct ThemeToggle {
    id: ElementId,
    state: Entity<ThemeState>,
    style: StyleRefinement,
}

impl ThemeToggle {
    pub fn new(id: impl Into<ElementId>, state: Entity<ThemeState>) -> Self {
        Self {
            id: id.into(),
            state,
            style: StyleRefinement::default(),
        }
    }
}

impl Styled for ThemeToggle {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for ThemeToggle {
    fn render(self, _window: &mut gpui::Window, cx: &mut App) -> impl IntoElement {
        let mode = self.state.read(cx).theme();
        let is_dark = mode.is_dark();

        let sun_color = ThemeStatusKind::Warning.resolve(cx);
        let moon_color = cx.active_variant().colors.primary.s400;

        let tooltip_lines: [SharedString; 2] = [accessible_label(is_dark).into(), title(mode)];
        let state = self.state.clone();

        div()
            .id(self.id.clone())
            .debug_selector(|| "theme-toggle".into())
            .flex_none()
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .tooltip(move |_window, cx| Tooltip::view(tooltip_lines.clone(), cx))
            .child(
                Switch::new(self.id.with_suffix("switch"))
                    .layer(ThemeLayerKind::Tertiary)
                    .checked(is_dark)
                    .icons(
                        Icon::new(IconKind::Sun).color(sun_color),
                        Icon::new(IconKind::Moon).color(moon_color),
                    )
                    .on_click(move |_event, _window, cx| activate(&state, cx)),
            )
    }
}
