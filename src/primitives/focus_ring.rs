use std::time::Duration;

use gpui::{
    Animation, AnimationExt, CornersRefinement, ElementId, FocusHandle, IntoElement, Pixels,
    RenderOnce, div, ease_out_quint, prelude::*, px,
};
use gpui_squircle::{SquircleStyleRefinement, SquircleStyled, squircle};

use crate::{theme::ThemeBorderKind, utils::RgbaExt};

const SIZE_SCALE_FACTOR: f32 = 8.;
const RING_OPACITY: f32 = 0.3;

/// A ring drawn around a focusable component while its focus handle is
/// focused. It grows in from a larger, faded outline.
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    style: SquircleStyleRefinement,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            style: SquircleStyleRefinement::default(),
        }
    }
}

impl SquircleStyled for FocusRing {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style.inner
    }

    fn outer_style(&mut self) -> &mut SquircleStyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        if !self.focus_handle.is_focused(window) {
            return div().into_any_element();
        }

        let focus_color = ThemeBorderKind::Focus.resolve(cx);
        let corner_radii = self.style.corner_radii.clone();

        squircle()
            .absolute()
            .top_0()
            .bottom_0()
            .left_0()
            .right_0()
            .border(px(3.))
            .border_outside()
            .with_animation(
                self.id,
                Animation::new(Duration::from_millis(365)).with_easing(ease_out_quint()),
                move |mut this, delta| {
                    let size_factor = (1. - delta) * SIZE_SCALE_FACTOR;

                    this.outer_style().corner_radii =
                        grow_corner_radii(&corner_radii, px(8.), px(size_factor + 1.));

                    this.inset(px(-size_factor))
                        .border_color(focus_color.alpha(delta * RING_OPACITY))
                },
            )
            .into_any_element()
    }
}

fn grow_corner_radii(
    corner_radii: &CornersRefinement<Pixels>,
    default: Pixels,
    by: Pixels,
) -> CornersRefinement<Pixels> {
    CornersRefinement {
        top_left: Some(corner_radii.top_left.unwrap_or(default) + by),
        top_right: Some(corner_radii.top_right.unwrap_or(default) + by),
        bottom_right: Some(corner_radii.bottom_right.unwrap_or(default) + by),
        bottom_left: Some(corner_radii.bottom_left.unwrap_or(default) + by),
    }
}
