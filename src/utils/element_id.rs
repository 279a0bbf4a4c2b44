use gpui::{ElementId, SharedString};

pub trait ElementIdExt {
    /// Derives a child id, used to key per-element state like hover or focus.
    fn with_suffix(&self, suffix: impl Into<SharedString>) -> ElementId;
}

impl ElementIdExt for ElementId {
    fn with_suffix(&self, suffix: impl Into<SharedString>) -> ElementId {
        ElementId::NamedChild(Box::new(self.clone()), suffix.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_are_distinct() {
        let id = ElementId::Name("theme-toggle".into());

        assert_ne!(id.with_suffix("state:hover"), id.with_suffix("state:focus_handle"));
        assert_eq!(id.with_suffix("knob"), id.with_suffix("knob"));
        assert_ne!(id.with_suffix("knob"), id);
    }
}
