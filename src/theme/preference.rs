use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use gpui::WindowAppearance;
use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

/// The persisted form of the user's choice, `{"theme":"dark"}`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreference {
    #[serde(default)]
    pub theme: Option<ThemeMode>,
}

/// The mode to start in: the stored preference if there is one, otherwise
/// whatever the system appearance is.
pub fn initial_theme_mode(persisted: Option<ThemeMode>, appearance: WindowAppearance) -> ThemeMode {
    persisted.unwrap_or_else(|| appearance.into())
}

/// A JSON file holding a [`ThemePreference`].
#[derive(Debug, Clone)]
pub struct ThemePreferenceFile {
    path: PathBuf,
}

impl ThemePreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored mode. A missing file is not an error.
    pub fn load(&self) -> anyhow::Result<Option<ThemeMode>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("could not read theme preference {}", self.path.display())
                });
            }
        };

        let preference: ThemePreference = serde_json::from_str(&contents)
            .with_context(|| format!("invalid theme preference in {}", self.path.display()))?;

        Ok(preference.theme)
    }

    /// Writes `theme`, replacing any stored value.
    ///
    /// The JSON goes to a sibling temp file first and is renamed over the
    /// preference, so readers never see a partial file.
    pub fn save(&self, theme: ThemeMode) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, self.serialize(theme)?)
            .with_context(|| format!("could not write theme preference {}", temp.display()))?;
        std::fs::rename(&temp, &self.path)
            .with_context(|| format!("could not replace theme preference {}", self.path.display()))
    }

    pub async fn save_async(&self, theme: ThemeMode) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            smol::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("could not create {}", parent.display()))?;
        }

        let temp = self.temp_path();
        smol::fs::write(&temp, self.serialize(theme)?)
            .await
            .with_context(|| format!("could not write theme preference {}", temp.display()))?;
        smol::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("could not replace theme preference {}", self.path.display()))
    }

    /// Loads the stored mode, falling back to `appearance` when there is none
    /// or the file can't be used.
    pub fn resolve_initial_mode(&self, appearance: WindowAppearance) -> ThemeMode {
        let persisted = self.load().unwrap_or_else(|err| {
            log::warn!("{err:#}, using the system appearance instead");
            None
        });

        initial_theme_mode(persisted, appearance)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn serialize(&self, theme: ThemeMode) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&ThemePreference {
            theme: Some(theme),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_value_wins() {
        assert_eq!(
            initial_theme_mode(Some(ThemeMode::Light), WindowAppearance::Dark),
            ThemeMode::Light
        );
        assert_eq!(
            initial_theme_mode(Some(ThemeMode::Dark), WindowAppearance::Light),
            ThemeMode::Dark
        );
        assert_eq!(initial_theme_mode(None, WindowAppearance::VibrantDark), ThemeMode::Dark);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("theme.json"));

        assert_eq!(file.load().unwrap(), None);
        assert_eq!(file.resolve_initial_mode(WindowAppearance::Dark), ThemeMode::Dark);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("nested").join("theme.json"));

        file.save(ThemeMode::Dark).unwrap();
        assert_eq!(file.load().unwrap(), Some(ThemeMode::Dark));

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value, serde_json::json!({ "theme": "dark" }));

        file.save(ThemeMode::Light).unwrap();
        assert_eq!(file.resolve_initial_mode(WindowAppearance::Dark), ThemeMode::Light);
    }

    #[test]
    fn test_save_async() {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("theme.json"));

        smol::block_on(file.save_async(ThemeMode::Light)).unwrap();
        assert_eq!(file.load().unwrap(), Some(ThemeMode::Light));

        smol::block_on(file.save_async(ThemeMode::Dark)).unwrap();
        assert_eq!(file.load().unwrap(), Some(ThemeMode::Dark));
        assert!(!file.temp_path().exists());
    }

    #[test]
    fn test_save_replaces_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("theme.json"));
        assert_eq!(file.temp_path(), dir.path().join("theme.json.tmp"));

        file.save(ThemeMode::Dark).unwrap();
        file.save(ThemeMode::Light).unwrap();

        assert_eq!(file.load().unwrap(), Some(ThemeMode::Light));
        assert!(!file.temp_path().exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unknown_theme_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("theme.json"));
        std::fs::write(file.path(), r#"{ "theme": "system" }"#).unwrap();

        let err = file.load().unwrap_err();
        assert!(format!("{err:#}").contains("invalid theme preference"));

        assert_eq!(file.resolve_initial_mode(WindowAppearance::Light), ThemeMode::Light);
        assert_eq!(file.resolve_initial_mode(WindowAppearance::Dark), ThemeMode::Dark);
    }

    #[test]
    fn test_empty_preference_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = ThemePreferenceFile::new(dir.path().join("theme.json"));
        std::fs::write(file.path(), "{}").unwrap();

        assert_eq!(file.load().unwrap(), None);
        assert_eq!(file.resolve_initial_mode(WindowAppearance::Dark), ThemeMode::Dark);
    }
}
