use gpui::{App, ClickEvent, Window};

pub type OnClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

/// Click handlers attached to an interactive component.
#[derive(Default)]
pub struct ClickHandlers {
    /// Called when the element is clicked (mouse down + up within bounds) or
    /// activated from the keyboard.
    pub on_click: Option<OnClickHandler>,
}

impl ClickHandlers {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A trait for components that accept click handlers.
pub trait Clickable: Sized {
    fn click_handlers_mut(&mut self) -> &mut ClickHandlers;

    fn on_click(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.click_handlers_mut().on_click = Some(Box::new(handler));
        self
    }
}
