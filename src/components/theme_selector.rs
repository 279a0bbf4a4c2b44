use gpui::{
    AnimationExt, AnyElement, App, CursorStyle, Div, ElementId, Entity, FontWeight,
    InteractiveElement, IntoElement, ParentElement, Pixels, RenderOnce, SharedString, Stateful,
    StatefulInteractiveElement, Styled, div, prelude::FluentBuilder, px, white,
};
use gpui_squircle::SquircleStyled;

use crate::{
    ElementIdExt,
    components::{Icon, IconKind},
    primitives::FocusRing,
    theme::{
        ComponentState, ComponentStyled, ThemeBackgroundKind, ThemeBorderKind, ThemeExt,
        ThemeLayoutCornerRadiiKind, ThemeMode, ThemeState, ThemeTextKind, ThemeTextSizeKind,
    },
};

/// Below this breakpoint the options stack in a single column.
pub const TWO_COLUMN_BREAKPOINT: &str = "sm";

/// The animation token the check badge appears with.
pub const BADGE_ANIMATION: &str = "scale-in";

const PREVIEW_CAPTION: &str = "Preview";
const BADGE_SIZE: f32 = 24.;
const BADGE_OFFSET: f32 = -8.;

/// Whether `option` is the one to mark as selected.
pub fn is_selected(option: ThemeMode, current: ThemeMode) -> bool {
    option == current
}

/// Applies the choice of `option`. Choosing the current theme changes nothing.
pub fn select_option(state: &Entity<ThemeState>, option: ThemeMode, cx: &mut App) {
    state.update(cx, |state, cx| match option {
        ThemeMode::Light => state.set_light_theme(cx),
        ThemeMode::Dark => state.set_dark_theme(cx),
    });
}

/// A panel offering one card per theme, with the current one marked.
#[derive(IntoElement)]
pub struct ThemeSelector {
    id: ElementId,
    state: Entity<ThemeState>,
    title: SharedString,
}

impl ThemeSelector {
    pub fn new(id: impl Into<ElementId>, state: Entity<ThemeState>) -> Self {
        Self {
            id: id.into(),
            state,
            title: "Choose Theme".into(),
        }
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }
}

fn check_badge(id: ElementId, option: ThemeMode, cx: &App) -> AnyElement {
    let tokens = &cx.get_theme().tokens;
    let background = cx.active_variant().colors.primary.s500;

    let badge = div()
        .debug_selector(|| format!("theme-option-{}-badge", option.as_str()))
        .absolute()
        .flex()
        .items_center()
        .justify_center()
        .rounded_full()
        .bg(background)
        .child(Icon::new(IconKind::Checkmark).size(px(16.)).color(white()));

    let place = |badge: Div, scale: f32| {
        let size = px(BADGE_SIZE * scale);
        let offset = px(BADGE_OFFSET + BADGE_SIZE * (1. - scale) / 2.);
        badge.size(size).top(offset).right(offset)
    };

    let appear = tokens
        .animation(BADGE_ANIMATION)
        .and_then(|animation| {
            Ok((
                animation.to_animation(),
                tokens.keyframes_for(animation)?.clone(),
            ))
        })
        .inspect_err(|err| log::warn!("check badge will not animate: {err}"));

    match appear {
        Ok((animation, track)) => badge
            .with_animation(id, animation, move |badge, delta| {
                let sample = track.sample(delta);
                place(badge, sample.scale).opacity(sample.opacity)
            })
            .into_any_element(),
        Err(_) => place(badge, 1.).into_any_element(),
    }
}

impl ThemeSelector {
    fn render_option(
        &self,
        option: ThemeMode,
        current: ThemeMode,
        window: &mut gpui::Window,
        cx: &mut App,
    ) -> Stateful<Div> {
        let id = self.id.with_suffix(option.as_str());
        let selected = is_selected(option, current);
        let theme = cx.get_theme();

        let (border_color, background, text_color) = if selected {
            let primary = &cx.active_variant().colors.primary;
            (primary.s500, primary.s50, primary.s700)
        } else {
            (
                ThemeBorderKind::Primary.resolve(cx),
                ThemeBackgroundKind::Secondary.resolve(cx),
                ThemeTextKind::Secondary.resolve(cx),
            )
        };
        let hover_border_color = ThemeBorderKind::Accent.resolve(cx);
        let radius = ThemeLayoutCornerRadiiKind::Lg.resolve(cx);
        let preview_radius = theme.layout.corner_radii.base;
        let padding = theme.tokens.spacing("4").unwrap_or(px(16.).into());
        let gap = theme.tokens.spacing("3").unwrap_or(px(12.).into());
        let glyph_size = ThemeTextSizeKind::Lg.resolve(cx);
        let description_size = ThemeTextSizeKind::Body.resolve(cx);
        let caption_size = ThemeTextSizeKind::Caption.resolve(cx);

        let focus_handle = window
            .use_keyed_state(id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                cx.focus_handle().tab_stop(true)
            })
            .read(cx)
            .clone();

        let badge = selected.then(|| check_badge(id.with_suffix("badge"), option, cx));
        let state = self.state.clone();

        div()
            .id(id.clone())
            .debug_selector(|| format!("theme-option-{}", option.as_str()))
            .relative()
            .flex()
            .flex_col()
            .flex_1()
            .gap(gap)
            .p(padding)
            .rounded(radius)
            .border_2()
            .border_color(border_color)
            .bg(background)
            .text_color(text_color)
            .cursor(CursorStyle::PointingHand)
            .when(!selected, |this| {
                this.hover(move |style| style.border_color(hover_border_color))
            })
            .child(
                FocusRing::new(id.with_suffix("focus_ring"), focus_handle.clone()).rounded(radius),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .text_center()
                    .child(div().mb(px(8.)).text_size(glyph_size).child(option.glyph()))
                    .child(
                        div()
                            .mb(px(4.))
                            .font_weight(FontWeight::MEDIUM)
                            .child(option.label()),
                    )
                    .child(
                        div()
                            .text_size(description_size)
                            .opacity(0.7)
                            .child(option.description()),
                    ),
            )
            .child(
                div()
                    .debug_selector(|| format!("theme-option-{}-preview", option.as_str()))
                    .flex()
                    .items_center()
                    .justify_center()
                    .w_full()
                    .h(px(32.))
                    .rounded(preview_radius)
                    .border_2()
                    .bg(option.preview_background())
                    .border_color(option.preview_border())
                    .text_size(caption_size)
                    .font_weight(FontWeight::MEDIUM)
                    .child(PREVIEW_CAPTION),
            )
            .when_some(badge, |this, badge| this.child(badge))
            .on_mouse_down(gpui::MouseButton::Left, |_, window, _cx| {
                // Keeps the focus ring from appearing on mouse clicks.
                window.prevent_default();
            })
            .on_click(move |_event, _window, cx| {
                cx.stop_propagation();
                select_option(&state, option, cx);
            })
            .track_focus(&focus_handle)
    }
}

impl RenderOnce for ThemeSelector {
    fn render(self, window: &mut gpui::Window, cx: &mut App) -> impl IntoElement {
        let current = self.state.read(cx).theme();
        let theme = cx.get_theme();
        let heading_size = ThemeTextSizeKind::Md.resolve(cx);
        let heading_weight = theme.layout.text.default_font.weights.heading_md;
        let heading_color = ThemeTextKind::Primary.resolve(cx);
        let gap = theme.tokens.spacing("4").unwrap_or(px(16.).into());

        let width: Pixels = window.viewport_size().width;
        let two_columns = theme
            .tokens
            .is_at_least(TWO_COLUMN_BREAKPOINT, width)
            .unwrap_or(true);

        let panel_style = cx
            .component_style("analytics-card")
            .inspect_err(|err| log::warn!("theme selector panel is unstyled: {err}"))
            .ok();

        let options: Vec<_> = ThemeMode::ALL
            .into_iter()
            .map(|option| self.render_option(option, current, window, cx))
            .collect();

        div()
            .id(self.id.clone())
            .flex()
            .flex_col()
            .gap(gap)
            .when_some(panel_style, |this, style| {
                this.component_style(&style, ComponentState::default())
            })
            .child(
                div()
                    .text_size(heading_size)
                    .font_weight(FontWeight(heading_weight))
                    .text_color(heading_color)
                    .child(self.title.clone()),
            )
            .child(
                div()
                    .flex()
                    .gap(gap)
                    .map(|this| if two_columns { this.flex_row() } else { this.flex_col() })
                    .children(options),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeChanged};
    use gpui::{AppContext, Context, Modifiers, TestAppContext, VisualTestContext, Window};
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_exactly_one_option_is_selected() {
        for current in ThemeMode::ALL {
            let selected: Vec<_> = ThemeMode::ALL
                .into_iter()
                .filter(|option| is_selected(*option, current))
                .collect();

            assert_eq!(selected, vec![current]);
        }
    }

    #[gpui::test]
    fn test_title(cx: &mut TestAppContext) {
        let state = cx.new(|_cx| ThemeState::new(ThemeMode::Light));

        let selector = ThemeSelector::new("selector", state.clone());
        assert_eq!(selector.title.as_ref(), "Choose Theme");

        let selector = ThemeSelector::new("selector", state).title("Appearance");
        assert_eq!(selector.title.as_ref(), "Appearance");
    }

    #[gpui::test]
    fn test_selecting_dark_from_light(cx: &mut TestAppContext) {
        let state = cx.update(|cx| ThemeState::install(ThemeMode::Light, cx));

        cx.update(|cx| select_option(&state, ThemeMode::Dark, cx));

        state.read_with(cx, |state, _| {
            assert_eq!(state.theme(), ThemeMode::Dark);
            assert!(state.is_dark());
        });
    }

    #[gpui::test]
    fn test_selecting_the_current_option_changes_nothing(cx: &mut TestAppContext) {
        let state = cx.update(|cx| ThemeState::install(ThemeMode::Dark, cx));
        let events = Rc::new(RefCell::new(Vec::new()));

        cx.update({
            let events = events.clone();
            let state = state.clone();
            move |cx| {
                cx.subscribe(&state, move |_state, event: &ThemeChanged, _cx| {
                    events.borrow_mut().push(*event);
                })
                .detach();
            }
        });

        cx.update(|cx| select_option(&state, ThemeMode::Dark, cx));
        cx.update(|cx| select_option(&state, ThemeMode::Dark, cx));

        assert!(events.borrow().is_empty());
        assert!(state.read_with(cx, |state, _| state.is_dark()));
    }

    fn option_selector(option: ThemeMode) -> &'static str {
        match option {
            ThemeMode::Light => "theme-option-light",
            ThemeMode::Dark => "theme-option-dark",
        }
    }

    fn badge_selector(option: ThemeMode) -> &'static str {
        match option {
            ThemeMode::Light => "theme-option-light-badge",
            ThemeMode::Dark => "theme-option-dark-badge",
        }
    }

    fn badged_options(cx: &mut VisualTestContext) -> Vec<ThemeMode> {
        ThemeMode::ALL
            .into_iter()
            .filter(|option| cx.debug_bounds(badge_selector(*option)).is_some())
            .collect()
    }

    fn click_option(cx: &mut VisualTestContext, option: ThemeMode) {
        let bounds = cx
            .debug_bounds(option_selector(option))
            .unwrap_or_else(|| panic!("the {option} card was not rendered"));

        cx.simulate_click(bounds.center(), Modifiers::none());
        cx.run_until_parked();
    }

    #[gpui::test]
    fn test_clicking_cards_selects_them(cx: &mut TestAppContext) {
        let state = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            ThemeState::install(ThemeMode::Light, cx)
        });

        let window = cx.update(|cx| {
            let state = state.clone();
            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| SelectorTestView { state })
            })
            .unwrap()
        });

        let cx = &mut VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        assert_eq!(badged_options(cx), vec![ThemeMode::Light]);

        click_option(cx, ThemeMode::Dark);
        state.read_with(cx, |state, _| {
            assert_eq!(state.theme(), ThemeMode::Dark);
            assert!(state.is_dark());
        });
        assert_eq!(badged_options(cx), vec![ThemeMode::Dark]);

        click_option(cx, ThemeMode::Dark);
        assert_eq!(state.read_with(cx, |state, _| state.theme()), ThemeMode::Dark);
        assert_eq!(badged_options(cx), vec![ThemeMode::Dark]);

        click_option(cx, ThemeMode::Light);
        assert_eq!(state.read_with(cx, |state, _| state.theme()), ThemeMode::Light);
        assert_eq!(badged_options(cx), vec![ThemeMode::Light]);
    }

    #[gpui::test]
    fn test_cards_end_with_a_preview_strip(cx: &mut TestAppContext) {
        let state = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            ThemeState::install(ThemeMode::Dark, cx)
        });

        let window = cx.update(|cx| {
            let state = state.clone();
            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| SelectorTestView { state })
            })
            .unwrap()
        });

        let cx = &mut VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        for (option, preview) in [
            (ThemeMode::Light, "theme-option-light-preview"),
            (ThemeMode::Dark, "theme-option-dark-preview"),
        ] {
            let card = cx.debug_bounds(option_selector(option)).unwrap();
            let preview = cx.debug_bounds(preview).unwrap();

            assert_eq!(preview.size.height, px(32.));
            assert!(preview.top() > card.top());
            assert!(preview.bottom() <= card.bottom());
            assert!(preview.left() > card.left());
            assert!(preview.right() < card.right());
        }
    }

    struct SelectorTestView {
        state: Entity<ThemeState>,
    }

    impl gpui::Render for SelectorTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div()
                .size_full()
                .child(ThemeSelector::new("theme-selector", self.state.clone()))
        }
    }
}
