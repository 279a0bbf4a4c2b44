use std::path::PathBuf;

use gpui::{
    App, AppContext, Application, Bounds, Context, Entity, FocusHandle, KeyBinding, Menu,
    TitlebarOptions, Window, WindowBounds, WindowOptions, actions, div, point, prelude::*, px,
    size,
};

use gpui_theme_picker::{
    BundledAssets, assets,
    components::{ThemeSelector, ThemeToggle},
    theme::{
        ThemeBackgroundKind, ThemePreferenceFile, ThemeState, ThemeTextKind, ThemeTextSizeKind,
    },
};

const PREFERENCE_PATH_VAR: &str = "THEME_PICKER_PREFERENCE";

struct Gallery {
    focus_handle: FocusHandle,
    state: Entity<ThemeState>,
}

actions!(window, [TabNext, TabPrev]);

impl Gallery {
    fn new(state: Entity<ThemeState>, cx: &mut Context<Self>) -> Self {
        cx.observe(&state, |_gallery, _state, cx| cx.notify())
            .detach();

        Self {
            focus_handle: cx.focus_handle(),
            state,
        }
    }
}

impl Render for Gallery {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        gpui_theme_picker::init_for_window(window, cx);

        let background = ThemeBackgroundKind::Primary.resolve(cx);
        let text_color = ThemeTextKind::Primary.resolve(cx);
        let text_size = ThemeTextSizeKind::Body.resolve(cx);

        div()
            .tab_group()
            .track_focus(&self.focus_handle)
            .size_full()
            .text_size(text_size)
            .text_color(text_color)
            .bg(background)
            .flex()
            .flex_col()
            .items_center()
            .gap(px(32.))
            .p(px(48.))
            .child(
                div()
                    .w_full()
                    .flex()
                    .justify_end()
                    .child(ThemeToggle::new("theme-toggle", self.state.clone())),
            )
            .child(
                div()
                    .w_full()
                    .max_w(px(560.))
                    .child(ThemeSelector::new("theme-selector", self.state.clone())),
            )
    }
}

fn preference_file() -> ThemePreferenceFile {
    let path = std::env::var_os(PREFERENCE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("theme_preference.json"));

    ThemePreferenceFile::new(path)
}

fn main() {
    env_logger::init();

    Application::new()
        .with_quit_mode(gpui::QuitMode::LastWindowClosed)
        .with_assets(assets![BundledAssets])
        .run(|cx: &mut App| {
            gpui_theme_picker::init(cx);

            cx.set_menus(vec![Menu {
                name: "Theme Gallery".into(),
                items: vec![],
            }]);

            let file = preference_file();
            let mode = file.resolve_initial_mode(cx.window_appearance());
            log::info!("preferences at {}", file.path().display());

            let state = ThemeState::install(mode, cx);
            ThemeState::persist_to(&state, file, cx);

            let bounds = Bounds::centered(None, size(px(720.), px(560.)), cx);

            let opened = cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(10.), px(10.))),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                |_window, cx| cx.new(|cx| Gallery::new(state, cx)),
            );

            if let Err(err) = opened {
                log::error!("could not open the gallery window: {err:#}");
                cx.quit();
                return;
            }

            init_tab_indexing_actions(cx);

            cx.activate(true);
        });
}

fn init_tab_indexing_actions(cx: &mut App) {
    cx.on_action(move |_: &TabNext, cx| {
        cx.defer(move |cx| {
            let Some(window) = cx.active_window() else {
                return;
            };

            let _ = window.update(cx, move |_, window, cx| {
                window.focus_next(cx);
            });
        })
    });

    cx.on_action(move |_: &TabPrev, cx| {
        cx.defer(move |cx| {
            let Some(window) = cx.active_window() else {
                return;
            };

            let _ = window.update(cx, move |_, window, cx| {
                window.focus_prev(cx);
            });
        })
    });

    cx.bind_keys([KeyBinding::new("tab", TabNext, None)]);
    cx.bind_keys([KeyBinding::new("shift-tab", TabPrev, None)]);
}
