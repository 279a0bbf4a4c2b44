#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::App;

use crate::theme::ThemeExt;

/// Text size variants that resolve to theme-defined values.
///
/// Use `resolve()` to get the actual `AbsoluteLength` from the current theme.
#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::AbsoluteLength)]
pub enum ThemeTextSizeKind {
    /// Extra large heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_xl)]
    Xl,
    /// Large heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_lg)]
    Lg,
    /// Medium heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_md)]
    Md,
    /// Small heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_sm)]
    Sm,
    /// Standard body text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.body)]
    Body,
    /// Small caption or label text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.caption)]
    Caption,
}

/// Component size variants that resolve to theme-defined pixel values.
#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutSizeKind {
    #[assoc(resolve = cx.get_theme().layout.size.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.size.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.size.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.size.sm)]
    Sm,
}

/// Padding variants that resolve to theme-defined spacing values.
#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutPaddingKind {
    #[assoc(resolve = cx.get_theme().layout.padding.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.padding.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.padding.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.padding.sm)]
    Sm,
}

/// Corner radius variants that resolve to theme-defined values.
#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutCornerRadiiKind {
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xxl)]
    Xxl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.sm)]
    Sm,
    /// Fully rounded, for pills and knobs.
    #[assoc(resolve = gpui::px(9999.))]
    Full,
}

/// Surface colors from the active theme variant.
#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum ThemeBackgroundKind {
    /// The page background.
    #[assoc(resolve = cx.active_variant().colors.bg.primary)]
    Primary,
    #[assoc(resolve = cx.active_variant().colors.bg.secondary)]
    Secondary,
    #[assoc(resolve = cx.active_variant().colors.bg.tertiary)]
    Tertiary,
    #[assoc(resolve = cx.active_variant().colors.bg.card)]
    Card,
    #[assoc(resolve = cx.active_variant().colors.bg.sidebar)]
    Sidebar,
    #[assoc(resolve = cx.active_variant().colors.bg.header)]
    Header,
    #[assoc(resolve = cx.active_variant().colors.bg.modal)]
    Modal,
    /// Dims the content behind modals.
    #[assoc(resolve = cx.active_variant().colors.bg.overlay)]
    Overlay,
}

/// Background layers for stacking surfaces with visual hierarchy.
///
/// Similar to `ThemeBackgroundKind` but supports `next()` to get the
/// surface color for nested elements.
#[derive(Assoc, Clone, Copy)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
#[func(pub fn next(&self) -> ThemeBackgroundKind)]
pub enum ThemeLayerKind {
    #[assoc(resolve = cx.active_variant().colors.bg.primary)]
    #[assoc(next = ThemeBackgroundKind::Secondary)]
    Primary,
    #[assoc(resolve = cx.active_variant().colors.bg.secondary)]
    #[assoc(next = ThemeBackgroundKind::Tertiary)]
    Secondary,
    #[assoc(resolve = cx.active_variant().colors.bg.tertiary)]
    #[assoc(next = ThemeBackgroundKind::Card)]
    Tertiary,
    #[assoc(resolve = cx.active_variant().colors.bg.card)]
    #[assoc(next = ThemeBackgroundKind::Tertiary)]
    Card,
}

impl From<ThemeLayerKind> for ThemeBackgroundKind {
    fn from(layer: ThemeLayerKind) -> Self {
        match layer {
            ThemeLayerKind::Primary => ThemeBackgroundKind::Primary,
            ThemeLayerKind::Secondary => ThemeBackgroundKind::Secondary,
            ThemeLayerKind::Tertiary => ThemeBackgroundKind::Tertiary,
            ThemeLayerKind::Card => ThemeBackgroundKind::Card,
        }
    }
}

#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum ThemeTextKind {
    #[assoc(resolve = cx.active_variant().colors.text.primary)]
    Primary,
    #[assoc(resolve = cx.active_variant().colors.text.secondary)]
    Secondary,
    #[assoc(resolve = cx.active_variant().colors.text.tertiary)]
    Tertiary,
    #[assoc(resolve = cx.active_variant().colors.text.muted)]
    Muted,
    #[assoc(resolve = cx.active_variant().colors.text.accent)]
    Accent,
    /// Text drawn on accent colored surfaces.
    #[assoc(resolve = cx.active_variant().colors.text.inverse)]
    Inverse,
}

#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum ThemeBorderKind {
    #[assoc(resolve = cx.active_variant().colors.border.primary)]
    Primary,
    #[assoc(resolve = cx.active_variant().colors.border.secondary)]
    Secondary,
    #[assoc(resolve = cx.active_variant().colors.border.accent)]
    Accent,
    #[assoc(resolve = cx.active_variant().colors.border.focus)]
    Focus,
}

/// Status colors, the 500 shade of each scale.
#[derive(Assoc)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum ThemeStatusKind {
    #[assoc(resolve = cx.active_variant().colors.success.s500)]
    Success,
    #[assoc(resolve = cx.active_variant().colors.warning.s500)]
    Warning,
    #[assoc(resolve = cx.active_variant().colors.error.s500)]
    Error,
    #[assoc(resolve = cx.active_variant().colors.info.s500)]
    Info,
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveThemeMode, Theme, ThemeExt, ThemeMode};
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_theme_text_size_kind_variants(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let _ = ThemeTextSizeKind::Xl.resolve(cx);
            let _ = ThemeTextSizeKind::Lg.resolve(cx);
            let _ = ThemeTextSizeKind::Md.resolve(cx);
            let _ = ThemeTextSizeKind::Sm.resolve(cx);
            let _ = ThemeTextSizeKind::Body.resolve(cx);
            let _ = ThemeTextSizeKind::Caption.resolve(cx);
        });
    }

    #[gpui::test]
    fn test_colors_follow_active_mode(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let light_bg = ThemeBackgroundKind::Primary.resolve(cx);
            let light_text = ThemeTextKind::Primary.resolve(cx);

            cx.set_global(ActiveThemeMode(ThemeMode::Dark));
            let dark_bg = ThemeBackgroundKind::Primary.resolve(cx);
            let dark_text = ThemeTextKind::Primary.resolve(cx);

            assert!(light_bg.r > dark_bg.r, "Light background should be brighter");
            assert!(light_text.r < dark_text.r, "Light text should be darker");
        });
    }

    #[gpui::test]
    fn test_theme_layer_kind_next(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert!(matches!(
                ThemeLayerKind::Primary.next(),
                ThemeBackgroundKind::Secondary
            ));
            assert!(matches!(
                ThemeLayerKind::Secondary.next(),
                ThemeBackgroundKind::Tertiary
            ));
            assert!(matches!(
                ThemeLayerKind::Tertiary.next(),
                ThemeBackgroundKind::Card
            ));

            let bg: ThemeBackgroundKind = ThemeLayerKind::Card.into();
            assert!(matches!(bg, ThemeBackgroundKind::Card));
        });
    }

    #[gpui::test]
    fn test_status_shades(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let variant = cx.active_variant().clone();

            assert_eq!(ThemeStatusKind::Warning.resolve(cx), variant.colors.warning.s500);
            assert_eq!(ThemeStatusKind::Success.resolve(cx), variant.colors.success.s500);
            assert_eq!(ThemeStatusKind::Error.resolve(cx), variant.colors.error.s500);
        });
    }

    #[gpui::test]
    fn test_size_ordering(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let sm = ThemeLayoutSizeKind::Sm.resolve(cx);
            let md = ThemeLayoutSizeKind::Md.resolve(cx);
            let lg = ThemeLayoutSizeKind::Lg.resolve(cx);
            let xl = ThemeLayoutSizeKind::Xl.resolve(cx);

            assert!(sm <= md, "Sm should be <= Md");
            assert!(md <= lg, "Md should be <= Lg");
            assert!(lg <= xl, "Lg should be <= Xl");
        });
    }

    #[gpui::test]
    fn test_padding_and_radii_ordering(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert!(ThemeLayoutPaddingKind::Sm.resolve(cx) <= ThemeLayoutPaddingKind::Md.resolve(cx));
            assert!(ThemeLayoutPaddingKind::Lg.resolve(cx) <= ThemeLayoutPaddingKind::Xl.resolve(cx));

            assert!(
                ThemeLayoutCornerRadiiKind::Sm.resolve(cx)
                    <= ThemeLayoutCornerRadiiKind::Lg.resolve(cx)
            );
            assert!(
                ThemeLayoutCornerRadiiKind::Xxl.resolve(cx)
                    < ThemeLayoutCornerRadiiKind::Full.resolve(cx)
            );
        });
    }
}
