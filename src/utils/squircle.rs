use gpui::{ColorSpace, Rgba, linear_color_stop, linear_gradient};
use gpui_squircle::{Squircle, SquircleStyled};

use crate::utils::RgbaExt;

pub trait SquircleExt {
    /// Strokes the border with a top-lit gradient, from `light` at the top
    /// to `dark` at the bottom.
    fn border_highlight(self, light: Rgba, dark: Rgba, opacity: f32) -> Self;
}

impl SquircleExt for Squircle {
    fn border_highlight(self, light: Rgba, dark: Rgba, opacity: f32) -> Self {
        self.border_color(
            linear_gradient(
                180.,
                linear_color_stop(light.alpha(opacity), 0.),
                linear_color_stop(dark.alpha(opacity), 1.),
            )
            .color_space(ColorSpace::Oklab),
        )
    }
}
