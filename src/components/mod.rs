mod icon;
pub use icon::*;

mod switch;
pub use switch::*;

pub mod theme_selector;
pub use theme_selector::ThemeSelector;

pub mod theme_toggle;
pub use theme_toggle::ThemeToggle;
