//! Local key/value preferences.
//!
//! Holds the few values that must survive before any identity exists, such
//! as the theme to paint the first frame with. Unlike the shared store this
//! file belongs to one host user and is never subscribed to.

use crate::domain::error::{ModPanelError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Preference key for the last chosen theme.
pub const THEME_KEY: &str = "theme";

/// Minimal string key/value store.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Preferences persisted as a flat JSON object.
#[derive(Debug)]
pub struct JsonPreferences {
    file_path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPreferences {
    /// Opens the preference file, starting empty if it is missing.
    ///
    /// An unreadable file is treated as empty and overwritten on the next
    /// write: preferences are a convenience and never block startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let values = match std::fs::read_to_string(&file_path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = ?file_path, error = %e, "ignoring unreadable preferences");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { file_path, values })
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| ModPanelError::Config(format!("failed to serialize preferences: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        tracing::debug!(key, "preference updated");
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = JsonPreferences::open(path.clone()).unwrap();
        assert_eq!(prefs.get(THEME_KEY), None);
        prefs.set(THEME_KEY, "light").unwrap();

        let reopened = JsonPreferences::open(path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn garbage_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let mut prefs = JsonPreferences::open(path).unwrap();
        assert_eq!(prefs.get(THEME_KEY), None);
        prefs.set(THEME_KEY, "dark").unwrap();
        prefs.remove(THEME_KEY).unwrap();
        assert_eq!(prefs.get(THEME_KEY), None);
    }
}
