//! # Theme Preference
//!
//! Light/dark theme with a single persisted flag. The flag is the only state the site keeps
//! between visits.
//!
//! Storage goes through [`PreferenceStore`] so the host can choose where the flag lives:
//! - [`FileStore`]: small JSON file, the terminal demo's equivalent of local storage
//! - [`MemoryStore`]: nothing persisted, for tests and embedding
//!
//! A store that cannot be read is not fatal. The manager logs it and starts in light mode.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from reading or writing the stored preference.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Preference file could not be read or written
    #[error("preference IO: {0}")]
    Io(#[from] io::Error),

    /// Preference file contents are not valid
    #[error("preference format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Site color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value for the document's `data-theme` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Icon class for the toggle button: it shows the theme you would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

/// Where the theme flag is kept.
pub trait PreferenceStore {
    /// Stored theme, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Theme>, ThemeError>;

    fn save(&self, theme: Theme) -> Result<(), ThemeError>;
}

/// JSON file store.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredPreference = serde_json::from_slice(&data)?;
        Ok(Some(stored.theme))
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let data = serde_json::to_vec(&StoredPreference { theme })?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    theme: Cell<Option<Theme>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Cell::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        Ok(self.theme.get())
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        self.theme.set(Some(theme));
        Ok(())
    }
}

/// Current theme plus the store that remembers it.
#[derive(Debug)]
pub struct ThemeManager<P: PreferenceStore> {
    theme: Theme,
    store: P,
}

impl<P: PreferenceStore> ThemeManager<P> {
    /// Read the stored preference, defaulting to light.
    pub fn load(store: P) -> Self {
        let theme = match store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "could not read theme preference, using light");
                Theme::default()
            }
        };
        debug!(theme = theme.as_attr(), "theme applied");
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it.
    ///
    /// # Errors
    /// The in-memory theme is flipped even when saving fails; the error reports that the
    /// choice will not survive a reload.
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        self.theme = self.theme.toggled();
        debug!(theme = self.theme.as_attr(), "theme toggled");
        self.store.save(self.theme)?;
        Ok(self.theme)
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_theme_attributes() {
        assert_eq!(Theme::Light.as_attr(), "light");
        assert_eq!(Theme::Dark.icon(), "fas fa-sun");
        assert_eq!(Theme::Light.icon(), "fas fa-moon");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_defaults_to_light() {
        let manager = ThemeManager::load(MemoryStore::new());
        assert_eq!(manager.theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut manager = ThemeManager::load(MemoryStore::with_theme(Theme::Dark));
        assert_eq!(manager.theme(), Theme::Dark);

        assert_eq!(manager.toggle().unwrap(), Theme::Light);
        assert_eq!(manager.store().load().unwrap(), Some(Theme::Light));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("theme.json"));
        assert_eq!(store.load().unwrap(), None);

        let mut manager = ThemeManager::load(store.clone());
        manager.toggle().unwrap();

        let reloaded = ThemeManager::load(store);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_light() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(ThemeError::Format(_))));
        assert_eq!(ThemeManager::load(store).theme(), Theme::Light);
    }
}
