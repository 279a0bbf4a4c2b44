use std::borrow::Cow;

use gpui::{Result, SharedString};
use rust_embed::RustEmbed;

use crate::assets::AssetProvider;

/// The icons the theme pickers draw, embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "icons/**/*.svg"]
#[exclude = "*.DS_Store"]
pub struct BundledAssets;

impl AssetProvider for BundledAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        <Self as RustEmbed>::get(path).map(|f| f.data)
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(BundledAssets::iter()
            .filter_map(|p| p.starts_with(path).then(|| p.into()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::IconKind;

    #[test]
    fn test_every_icon_kind_is_bundled() {
        for kind in [IconKind::Sun, IconKind::Moon, IconKind::Checkmark] {
            let svg = BundledAssets
                .get(&kind.path())
                .unwrap_or_else(|| panic!("{} is not bundled", kind.path()));

            assert!(std::str::from_utf8(&svg).unwrap().contains("<svg"));
        }
    }

    #[test]
    fn test_list_icons() {
        let mut icons = BundledAssets.list("icons/").unwrap();
        icons.sort();

        assert_eq!(
            icons,
            vec![
                SharedString::from("icons/checkmark.svg"),
                SharedString::from("icons/moon.svg"),
                SharedString::from("icons/sun.svg"),
            ]
        );
    }
}
