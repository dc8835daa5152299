//! Persisted language preference

use super::{Locale, find_matching_locale};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "locale";

/// Stores the chosen locale as a one-line file
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store under the platform config directory (`~/.config/qrcraft/locale` on Linux)
    pub fn system() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "qrcraft")
            .ok_or_else(|| Error::Config("Unable to determine a home directory".to_string()))?;
        Ok(Self::at(dirs.config_dir()))
    }

    /// Store inside `dir`
    pub fn at(dir: &Path) -> Self {
        Self {
            path: dir.join(FILE_NAME),
        }
    }

    /// File backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw stored tag, if any
    pub fn load_tag(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let tag = contents.trim();
                Ok((!tag.is_empty()).then(|| tag.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stored locale, matched onto a supported one
    pub fn load(&self) -> Result<Option<Locale>> {
        Ok(self.load_tag()?.as_deref().map(find_matching_locale))
    }

    /// Persist `locale`
    pub fn save(&self, locale: Locale) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, format!("{}\n", locale.tag()))?;
        tracing::debug!(path = %self.path.display(), %locale, "Saved locale preference");
        Ok(())
    }

    /// Forget the stored preference
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(&dir.path().join("nested"));
        assert_eq!(store.load().unwrap(), None);

        store.save(Locale::EsEs).unwrap();
        assert_eq!(store.load().unwrap(), Some(Locale::EsEs));
        assert_eq!(store.load_tag().unwrap().as_deref(), Some("es-ES"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn stale_tags_are_matched() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(dir.path());
        fs::write(store.path(), "zh-CN").unwrap();
        assert_eq!(store.load().unwrap(), Some(Locale::EnUs));
    }
}
