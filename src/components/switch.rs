use gpui::{
    AnyElement, AnimationExt, App, CursorStyle, ElementId, InteractiveElement, IntoElement,
    ParentElement, Pixels, RenderOnce, StatefulInteractiveElement, Styled, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::{
    ElementIdExt,
    components::Icon,
    primitives::{ClickHandlers, Clickable, FocusRing},
    theme::{
        AnimationToken, KeyframeTrack, ThemeBorderKind, ThemeExt, ThemeLayerKind,
        ThemeLayoutCornerRadiiKind, ThemeLayoutSizeKind, ThemeTextKind,
    },
    utils::{RgbaExt, SquircleExt},
};

/// The animation token the knob travels with.
pub const KNOB_ANIMATION: &str = "toggle-slide";

const KNOB_CLICK_DOWN_MULT: f32 = 1.25;
const DISABLED_OPACITY: f32 = 0.5;

#[derive(IntoElement)]
pub struct Switch {
    id: ElementId,
    layer: ThemeLayerKind,
    checked: bool,
    disabled: bool,
    icons: Option<(Icon, Icon)>,
    click_handlers: ClickHandlers,
}

impl Switch {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            layer: ThemeLayerKind::Tertiary,
            checked: false,
            disabled: false,
            icons: None,
            click_handlers: ClickHandlers::new(),
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Icons drawn inside the track: `off` at the start, shown while
    /// unchecked, and `on` at the end, shown while checked.
    pub fn icons(mut self, off: Icon, on: Icon) -> Self {
        self.icons = Some((off, on));
        self
    }
}

impl Clickable for Switch {
    fn click_handlers_mut(&mut self) -> &mut ClickHandlers {
        &mut self.click_handlers
    }
}

/// Remembers the last checked value a switch rendered with, so the knob only
/// slides after it changes and not on first paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KnobMotion {
    checked: bool,
    generation: usize,
}

impl KnobMotion {
    fn new(checked: bool) -> Self {
        Self {
            checked,
            generation: 0,
        }
    }

    /// Records the value being rendered. Returns whether it changed.
    fn observe(&mut self, checked: bool) -> bool {
        if self.checked == checked {
            return false;
        }

        self.checked = checked;
        self.generation += 1;
        true
    }

    fn has_moved(&self) -> bool {
        self.generation > 0
    }
}

fn knob_slide(cx: &App) -> Option<(AnimationToken, KeyframeTrack)> {
    let tokens = &cx.get_theme().tokens;

    tokens
        .animation(KNOB_ANIMATION)
        .and_then(|animation| Ok((animation.clone(), tokens.keyframes_for(animation)?.clone())))
        .inspect_err(|err| log::warn!("switch knob will not animate: {err}"))
        .ok()
}

/// Knob position from the start of the track, `progress` going from 0
/// (unchecked) to 1 (checked).
fn knob_left(padding: Pixels, travel: Pixels, progress: Pixels) -> Pixels {
    if progress < Pixels::ZERO {
        padding
    } else if progress > travel {
        padding + travel
    } else {
        padding + progress
    }
}

impl RenderOnce for Switch {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let inner_size = ThemeLayoutSizeKind::Md.resolve(cx);
        let icon_size = ThemeLayoutSizeKind::Sm.resolve(cx);
        let pill = ThemeLayoutCornerRadiiKind::Full.resolve(cx);
        let width = inner_size * 3.;
        let height = inner_size * 1.5;
        let padding = (height - inner_size) / 2.;
        let travel = width - inner_size - padding * 2.;

        let text_color = ThemeTextKind::Primary.resolve(cx);
        let focus_color = ThemeBorderKind::Focus.resolve(cx);
        let border_color = ThemeBorderKind::Primary.resolve(cx);
        let border_hover_color = ThemeBorderKind::Secondary.resolve(cx);
        let (highlight_light, highlight_dark) = (ThemeTextKind::Inverse.resolve(cx), text_color);
        let background_color = self.layer.resolve(cx);
        let background_hover_color = self.layer.next().resolve(cx);
        let border_click_down_color = border_color.lerp(&text_color, 0.16);

        let is_disabled = self.disabled;
        let checked = self.checked;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let is_click_down_state = window.use_keyed_state(
            self.id.with_suffix("state:click_down"),
            cx,
            |_window, _cx| false,
        );
        let is_click_down = *is_click_down_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

        if is_focus && is_disabled {
            window.blur();
        }

        let motion_state = window.use_keyed_state(
            self.id.with_suffix("state:knob_motion"),
            cx,
            |_window, _cx| KnobMotion::new(checked),
        );
        let motion = motion_state.update(cx, |motion, _cx| {
            motion.observe(checked);
            *motion
        });
        let slide = motion.has_moved().then(|| knob_slide(cx)).flatten();

        let current_border_color = if is_focus {
            focus_color
        } else if is_click_down {
            border_click_down_color
        } else if is_hover {
            border_hover_color
        } else {
            border_color
        };

        // The knob widens while pressed, growing towards the middle of the track.
        let knob_width = if is_click_down {
            px((f32::from(inner_size) * KNOB_CLICK_DOWN_MULT).floor())
        } else {
            inner_size
        };
        let knob_extra = knob_width - inner_size;

        let knob = div()
            .absolute()
            .top(padding)
            .w(knob_width)
            .h(inner_size)
            .rounded(pill)
            .bg(text_color);

        let knob: AnyElement = match &slide {
            Some((animation, track)) => {
                let track = track.clone();

                knob.with_animation(
                    self.id.with_suffix(format!("knob:{}", motion.generation)),
                    animation.to_animation(),
                    move |knob, delta| {
                        let offset = track.sample(delta).translate_x.resolve(travel);
                        let progress = if checked { offset } else { travel - offset };
                        knob.left(knob_left(padding, travel, progress))
                    },
                )
                .into_any_element()
            }
            None => {
                let progress = if checked { travel - knob_extra } else { Pixels::ZERO };
                knob.left(knob_left(padding, travel, progress))
                    .into_any_element()
            }
        };

        let icon_top = (height - icon_size) / 2.;
        let icon_slots = self.icons.map(|(off, on)| {
            [(off, !checked, true), (on, checked, false)].map(|(icon, visible, at_start)| {
                let icon = if icon.size.width.is_none() {
                    icon.size(icon_size)
                } else {
                    icon
                };

                let slot = div()
                    .absolute()
                    .top(icon_top)
                    .size(icon_size)
                    .flex()
                    .items_center()
                    .justify_center()
                    .map(|this| {
                        if at_start {
                            this.left(padding)
                        } else {
                            this.right(padding)
                        }
                    })
                    .child(icon);

                match &slide {
                    Some((animation, _)) => slot
                        .with_animation(
                            self.id.with_suffix(format!(
                                "icon:{}:{}",
                                if at_start { "off" } else { "on" },
                                motion.generation
                            )),
                            animation.to_animation(),
                            move |slot, delta| slot.opacity(if visible { delta } else { 1. - delta }),
                        )
                        .into_any_element(),
                    None => slot
                        .opacity(if visible { 1. } else { 0. })
                        .into_any_element(),
                }
            })
        });

        div()
            .id(self.id.clone())
            .relative()
            .flex_none()
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .when(is_disabled, |this| this.opacity(DISABLED_OPACITY))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(pill),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(pill)
                    .bg(if is_hover && !is_disabled {
                        background_hover_color
                    } else {
                        background_color
                    })
                    .border(px(1.))
                    .border_inside()
                    .border_color(current_border_color),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(pill)
                    .border(px(1.))
                    .border_inside()
                    .border_highlight(highlight_light, highlight_dark, 0.08),
            )
            .when_some(icon_slots, |this, slots| this.children(slots))
            .child(knob)
            .when(!is_disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let is_click_down_state_on_mouse_down = is_click_down_state.clone();
                let is_click_down_state_on_click = is_click_down_state.clone();
                let on_click = self.click_handlers.on_click;

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(gpui::MouseButton::Left, move |_, window, cx| {
                    // Keeps the focus ring from appearing on mouse clicks.
                    window.prevent_default();

                    is_click_down_state_on_mouse_down.update(cx, |this, _cx| *this = true);
                    cx.notify(is_click_down_state_on_mouse_down.entity_id());
                })
                .on_click(move |event, window, cx| {
                    window.prevent_default();
                    cx.stop_propagation();

                    if !is_focus {
                        window.blur();
                    }

                    is_click_down_state_on_click.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state_on_click.entity_id());

                    if let Some(on_click) = &on_click {
                        (on_click)(event, window, cx);
                    }
                })
                .on_mouse_up_out(gpui::MouseButton::Left, move |_event, _window, cx| {
                    // Pressed inside, released outside.
                    is_hover_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_hover_state.entity_id());

                    is_click_down_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state.entity_id());
                })
                .track_focus(&focus_handle)
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::{components::IconKind, theme::Theme};
    use gpui::{AppContext, Context, TestAppContext, VisualTestContext, Window};

    #[test]
    fn test_switch_defaults() {
        let switch = Switch::new("test-switch");
        assert!(!switch.checked, "Switch should start unchecked");
        assert!(!switch.disabled, "Switch should start enabled");
        assert!(switch.icons.is_none());
        assert!(matches!(switch.layer, ThemeLayerKind::Tertiary));
    }

    #[test]
    fn test_switch_builder_chain() {
        let switch = Switch::new("test-switch")
            .checked(true)
            .disabled(true)
            .layer(ThemeLayerKind::Secondary)
            .icons(Icon::new(IconKind::Sun), Icon::new(IconKind::Moon))
            .on_click(|_event, _window, _cx| {});

        assert!(switch.checked);
        assert!(switch.disabled);
        assert!(matches!(switch.layer, ThemeLayerKind::Secondary));
        assert!(switch.icons.is_some());
        assert!(switch.click_handlers.on_click.is_some());
    }

    #[test]
    fn test_knob_motion_only_counts_changes() {
        let mut motion = KnobMotion::new(false);
        assert!(!motion.has_moved());

        assert!(!motion.observe(false));
        assert!(!motion.has_moved(), "first paint should not animate");

        assert!(motion.observe(true));
        assert_eq!(motion.generation, 1);

        assert!(!motion.observe(true));
        assert!(motion.observe(false));
        assert_eq!(motion, KnobMotion { checked: false, generation: 2 });
    }

    #[test]
    fn test_knob_left_stays_on_the_track() {
        let (padding, travel) = (px(4.), px(24.));

        assert_eq!(knob_left(padding, travel, Pixels::ZERO), px(4.));
        assert_eq!(knob_left(padding, travel, px(12.)), px(16.));
        assert_eq!(knob_left(padding, travel, px(40.)), px(28.));
        assert_eq!(knob_left(padding, travel, px(-3.)), px(4.));
    }

    #[gpui::test]
    fn test_knob_slide_uses_the_toggle_token(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let (animation, track) = knob_slide(cx).unwrap();
            assert_eq!(animation.duration.as_millis(), 300);
            assert_eq!(track.sample(0.).translate_x.relative, 0.);
            assert_eq!(track.sample(1.).translate_x.relative, 1.);
        });
    }

    #[gpui::test]
    fn test_switch_renders_and_rerenders(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| SwitchTestView { checked: false })
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        let cx = &mut VisualTestContext::from_window(window.into(), cx);

        view.update(cx, |view, cx| {
            view.checked = true;
            cx.notify();
        });
        cx.run_until_parked();

        assert!(view.read_with(cx, |view, _| view.checked));
    }

    struct SwitchTestView {
        checked: bool,
    }

    impl gpui::Render for SwitchTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div().size_full().child(
                Switch::new("test-switch")
                    .checked(self.checked)
                    .icons(Icon::new(IconKind::Sun), Icon::new(IconKind::Moon)),
            )
        }
    }
}
