use gpui::{App, AppContext, Context, Entity, EventEmitter};

use crate::theme::{ActiveThemeMode, ThemeMode, ThemePreferenceFile};

/// The current theme, shared by every component that reads or changes it.
///
/// Components receive an `Entity<ThemeState>` and never keep a copy of the
/// mode themselves. All writes go through [`ThemeState::set_theme`].
pub struct ThemeState {
    theme: ThemeMode,
}

/// Emitted when the theme actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged {
    pub previous: ThemeMode,
    pub current: ThemeMode,
}

impl EventEmitter<ThemeChanged> for ThemeState {}

impl ThemeState {
    /// Creates a detached state, for tests and isolated previews.
    ///
    /// Themed colors follow the mode published by [`ThemeState::install`], not
    /// this instance. Components given a detached state show its mode (the
    /// switch position, the selected card) while still drawing the installed
    /// variant's colors.
    pub fn new(theme: ThemeMode) -> Self {
        Self { theme }
    }

    /// Creates the application's theme state.
    ///
    /// The active mode is published to the token table and kept in sync, and
    /// every window is refreshed when it changes.
    pub fn install(theme: ThemeMode, cx: &mut App) -> Entity<Self> {
        cx.set_global(ActiveThemeMode(theme));

        let state = cx.new(|_cx| Self::new(theme));

        cx.subscribe(&state, |_state, event: &ThemeChanged, cx| {
            cx.set_global(ActiveThemeMode(event.current));
            cx.refresh_windows();
        })
        .detach();

        log::info!("theme state installed in {theme} mode");
        state
    }

    /// Saves every change to `file` on the background executor.
    ///
    /// A single writer saves changes in the order they happen. When several
    /// arrive before it gets to them, only the newest is written.
    pub fn persist_to(state: &Entity<Self>, file: ThemePreferenceFile, cx: &mut App) {
        let (sender, receiver) = smol::channel::unbounded::<ThemeMode>();

        cx.background_spawn(async move {
            while let Ok(mut theme) = receiver.recv().await {
                while let Ok(newer) = receiver.try_recv() {
                    theme = newer;
                }

                if let Err(err) = file.save(theme) {
                    log::warn!("could not save theme preference: {err:#}");
                }
            }
        })
        .detach();

        cx.subscribe(state, move |_state, event: &ThemeChanged, _cx| {
            if sender.try_send(event.current).is_err() {
                log::warn!("theme preference writer has stopped, {} not saved", event.current);
            }
        })
        .detach();
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Changes the theme. Setting the current theme does nothing.
    pub fn set_theme(&mut self, theme: ThemeMode, cx: &mut Context<Self>) {
        if self.theme == theme {
            return;
        }

        let previous = std::mem::replace(&mut self.theme, theme);
        log::debug!("theme changed from {previous} to {theme}");

        cx.emit(ThemeChanged {
            previous,
            current: theme,
        });
        cx.notify();
    }

    pub fn set_light_theme(&mut self, cx: &mut Context<Self>) {
        self.set_theme(ThemeMode::Light, cx);
    }

    pub fn set_dark_theme(&mut self, cx: &mut Context<Self>) {
        self.set_theme(ThemeMode::Dark, cx);
    }

    pub fn toggle_theme(&mut self, cx: &mut Context<Self>) {
        self.set_theme(self.theme.toggled(), cx);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use gpui::TestAppContext;

    fn record_events(
        state: &Entity<ThemeState>,
        cx: &mut TestAppContext,
    ) -> Rc<RefCell<Vec<ThemeChanged>>> {
        let events = Rc::new(RefCell::new(Vec::new()));

        cx.update({
            let events = events.clone();
            move |cx| {
                cx.subscribe(state, move |_state, event: &ThemeChanged, _cx| {
                    events.borrow_mut().push(*event);
                })
                .detach();
            }
        });

        events
    }

    #[gpui::test]
    fn test_is_dark_matches_theme(cx: &mut TestAppContext) {
        for mode in ThemeMode::ALL {
            let state = cx.new(|_cx| ThemeState::new(mode));

            state.read_with(cx, |state, _cx| {
                assert_eq!(state.theme(), mode);
                assert_eq!(state.is_dark(), state.theme() == ThemeMode::Dark);
            });
        }
    }

    #[gpui::test]
    fn test_absolute_setters_are_idempotent(cx: &mut TestAppContext) {
        let state = cx.new(|_cx| ThemeState::new(ThemeMode::Dark));

        for _ in 0..3 {
            state.update(cx, |state, cx| state.set_light_theme(cx));
            assert_eq!(state.read_with(cx, |state, _| state.theme()), ThemeMode::Light);
        }

        for _ in 0..3 {
            state.update(cx, |state, cx| state.set_dark_theme(cx));
            assert!(state.read_with(cx, |state, _| state.is_dark()));
        }
    }

    #[gpui::test]
    fn test_toggle_twice_restores(cx: &mut TestAppContext) {
        for mode in ThemeMode::ALL {
            let state = cx.new(|_cx| ThemeState::new(mode));

            state.update(cx, |state, cx| state.toggle_theme(cx));
            assert_eq!(state.read_with(cx, |state, _| state.theme()), mode.toggled());

            state.update(cx, |state, cx| state.toggle_theme(cx));
            assert_eq!(state.read_with(cx, |state, _| state.theme()), mode);
        }
    }

    #[gpui::test]
    fn test_changes_emit_events(cx: &mut TestAppContext) {
        let state = cx.new(|_cx| ThemeState::new(ThemeMode::Light));
        let events = record_events(&state, cx);

        state.update(cx, |state, cx| state.set_dark_theme(cx));
        state.update(cx, |state, cx| state.toggle_theme(cx));

        assert_eq!(
            *events.borrow(),
            vec![
                ThemeChanged {
                    previous: ThemeMode::Light,
                    current: ThemeMode::Dark,
                },
                ThemeChanged {
                    previous: ThemeMode::Dark,
                    current: ThemeMode::Light,
                },
            ]
        );
    }

    #[gpui::test]
    fn test_setting_current_theme_emits_nothing(cx: &mut TestAppContext) {
        let state = cx.new(|_cx| ThemeState::new(ThemeMode::Light));
        let events = record_events(&state, cx);

        state.update(cx, |state, cx| state.set_light_theme(cx));
        state.update(cx, |state, cx| state.set_theme(ThemeMode::Light, cx));

        assert!(events.borrow().is_empty());
    }

    #[gpui::test]
    fn test_install_publishes_active_mode(cx: &mut TestAppContext) {
        let state = cx.update(|cx| ThemeState::install(ThemeMode::Dark, cx));
        assert_eq!(cx.read_global(|mode: &ActiveThemeMode, _| mode.0), ThemeMode::Dark);

        state.update(cx, |state, cx| state.toggle_theme(cx));
        assert_eq!(cx.read_global(|mode: &ActiveThemeMode, _| mode.0), ThemeMode::Light);

        state.update(cx, |state, cx| state.set_light_theme(cx));
        assert_eq!(cx.read_global(|mode: &ActiveThemeMode, _| mode.0), ThemeMode::Light);
    }

    #[gpui::test]
    fn test_independent_instances(cx: &mut TestAppContext) {
        let first = cx.new(|_cx| ThemeState::new(ThemeMode::Light));
        let second = cx.new(|_cx| ThemeState::new(ThemeMode::Light));

        first.update(cx, |state, cx| state.set_dark_theme(cx));

        assert!(first.read_with(cx, |state, _| state.is_dark()));
        assert!(!second.read_with(cx, |state, _| state.is_dark()));
    }

    #[gpui::test]
    fn test_persist_to_saves_changes(cx: &mut TestAppContext) {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("settings").join("theme.json"));

        let state = cx.update(|cx| ThemeState::install(ThemeMode::Light, cx));
        cx.update(|cx| ThemeState::persist_to(&state, file.clone(), cx));

        state.update(cx, |state, cx| state.set_dark_theme(cx));
        cx.run_until_parked();

        assert_eq!(file.load().unwrap(), Some(ThemeMode::Dark));
        assert!(state.read_with(cx, |state, _| state.is_dark()));
    }

    #[gpui::test]
    fn test_persist_to_ends_on_the_latest_change(cx: &mut TestAppContext) {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("theme.json"));

        let state = cx.update(|cx| ThemeState::install(ThemeMode::Light, cx));
        cx.update(|cx| ThemeState::persist_to(&state, file.clone(), cx));

        // Light -> dark -> light -> dark -> light -> dark, all before the writer runs.
        for _ in 0..5 {
            state.update(cx, |state, cx| state.toggle_theme(cx));
        }
        cx.run_until_parked();

        assert_eq!(file.load().unwrap(), Some(ThemeMode::Dark));

        state.update(cx, |state, cx| state.set_light_theme(cx));
        state.update(cx, |state, cx| state.toggle_theme(cx));
        state.update(cx, |state, cx| state.toggle_theme(cx));
        cx.run_until_parked();

        assert_eq!(file.load().unwrap(), Some(ThemeMode::Light));

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("theme.json")]);
    }

    #[gpui::test]
    fn test_detached_state_does_not_publish_its_mode(cx: &mut TestAppContext) {
        let installed = cx.update(|cx| ThemeState::install(ThemeMode::Light, cx));
        let detached = cx.new(|_cx| ThemeState::new(ThemeMode::Dark));

        detached.update(cx, |state, cx| state.set_light_theme(cx));
        detached.update(cx, |state, cx| state.set_dark_theme(cx));

        assert!(detached.read_with(cx, |state, _| state.is_dark()));
        assert_eq!(cx.read_global(|mode: &ActiveThemeMode, _| mode.0), ThemeMode::Light);

        installed.update(cx, |state, cx| state.set_dark_theme(cx));
        assert_eq!(cx.read_global(|mode: &ActiveThemeMode, _| mode.0), ThemeMode::Dark);
    }
}
