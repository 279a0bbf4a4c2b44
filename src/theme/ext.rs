use gpui::App;

use crate::theme::{ActiveThemeMode, ResolvedComponentStyle, Theme, ThemeError, ThemeVariant};

/// Extension trait for accessing and modifying the global token table.
pub trait ThemeExt {
    /// Installs a token table. Renders with the light variant until a
    /// [`ThemeState`](crate::theme::ThemeState) says otherwise.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// Gets the installed token table.
    ///
    /// # Panics
    ///
    /// Panics if no table has been installed. Themed components can't render
    /// without one.
    fn get_theme(&self) -> &Theme;

    fn try_get_theme(&self) -> Result<&Theme, ThemeError>;

    /// The color variant for the active mode.
    fn active_variant(&self) -> &ThemeVariant;

    /// Resolves a named component style against the active variant.
    fn component_style(&self, name: &str) -> Result<ResolvedComponentStyle, ThemeError>;
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        let theme = theme.as_ref().clone();
        log::info!("installing theme \"{}\"", theme.name);

        self.set_global::<Theme>(theme);
        if !self.has_global::<ActiveThemeMode>() {
            self.set_global(ActiveThemeMode::default());
        }
    }

    fn get_theme(&self) -> &Theme {
        match self.try_get_theme() {
            Ok(theme) => theme,
            Err(err) => panic!("{err}"),
        }
    }

    fn try_get_theme(&self) -> Result<&Theme, ThemeError> {
        self.try_global::<Theme>().ok_or(ThemeError::NotInstalled)
    }

    fn active_variant(&self) -> &ThemeVariant {
        self.get_theme().variants.active(self)
    }

    fn component_style(&self, name: &str) -> Result<ResolvedComponentStyle, ThemeError> {
        let theme = self.get_theme();
        theme
            .tokens
            .component(name)?
            .resolve(theme, self.active_variant())
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_set_and_get_theme(cx: &mut TestAppContext) {
        cx.update(|cx| {
            assert!(matches!(cx.try_get_theme(), Err(ThemeError::NotInstalled)));

            cx.set_theme(Theme::DEFAULT);
            let theme = cx.get_theme();
            assert!(!theme.name.is_empty(), "Theme should have a name");
            assert!(cx.try_get_theme().is_ok());
        });
    }

    #[gpui::test]
    fn test_set_theme_installs_light_mode(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert_eq!(cx.global::<ActiveThemeMode>().0, ThemeMode::Light);
            assert_eq!(cx.active_variant().kind, ThemeMode::Light);
        });
    }

    #[gpui::test]
    fn test_set_theme_keeps_active_mode(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_global(ActiveThemeMode(ThemeMode::Dark));
            cx.set_theme(Theme::DEFAULT);

            assert_eq!(cx.active_variant().kind, ThemeMode::Dark);
        });
    }

    #[gpui::test]
    fn test_component_style_follows_active_mode(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let light = cx.component_style("analytics-card").unwrap();

            cx.set_global(ActiveThemeMode(ThemeMode::Dark));
            let dark = cx.component_style("analytics-card").unwrap();

            assert_ne!(light.background, dark.background);
            assert!(matches!(
                cx.component_style("btn-tertiary"),
                Err(ThemeError::UnknownComponentStyle(_))
            ));
        });
    }

    #[gpui::test]
    fn test_theme_as_ref(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let theme = Theme::DEFAULT;
            let theme_ref: &Theme = theme.as_ref();
            assert!(!theme_ref.name.is_empty(), "Theme ref should have a name");

            cx.set_theme(Theme::DEFAULT);
            let retrieved = cx.get_theme();
            assert_eq!(retrieved.name, theme.name, "Theme names should match");
        });
    }
}
