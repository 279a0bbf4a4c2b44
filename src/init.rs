use gpui::{App, Window};

use crate::theme::{Theme, ThemeExt};

/// Installs the built-in token table unless the application already set one.
pub fn init(cx: &mut App) {
    if cx.try_get_theme().is_err() {
        cx.set_theme(Theme::DEFAULT);
    }
}

/// Sizes `rem` units in `window` from the token table.
pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
