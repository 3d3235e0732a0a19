//! Favorites persistence hooks.
//!
//! The store loads favorites once at construction and saves them after every
//! action that changed them. The backing format is a small JSON envelope.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use turbo_catalog::{FavoritesSet, Product};

use crate::error::StorageError;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Load-at-start / save-on-change persistence for favorites.
pub trait FavoritesStorage: Send {
    /// Load the saved favorites; an absent store yields an empty set.
    fn load(&self) -> Result<FavoritesSet, StorageError>;

    /// Replace the saved favorites.
    fn save(&self, favorites: &FavoritesSet) -> Result<(), StorageError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct FavoritesFile {
    version: u32,
    saved_at: DateTime<Utc>,
    items: FavoritesSet,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Envelope(FavoritesFile),
    Bare(Vec<Product>),
}

/// Favorites stored as JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "favorites.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn load(&self) -> Result<FavoritesSet, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved favorites");
                return Ok(FavoritesSet::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(FavoritesSet::new());
        }

        let parsed: OnDisk = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let favorites = match parsed {
            OnDisk::Envelope(file) if file.version > FORMAT_VERSION => {
                return Err(StorageError::UnsupportedVersion(file.version));
            }
            OnDisk::Envelope(file) => file.items,
            OnDisk::Bare(items) => items.into(),
        };
        debug!(path = %self.path.display(), count = favorites.count(), "loaded favorites");
        Ok(favorites)
    }

    fn save(&self, favorites: &FavoritesSet) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let file = FavoritesFile {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            items: favorites.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|e| StorageError::io(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| StorageError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = favorites.count(), "saved favorites");
        Ok(())
    }
}

/// Favorites kept in memory; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    saved: Arc<Mutex<Option<FavoritesSet>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `favorites` already saved.
    pub fn with_saved(favorites: FavoritesSet) -> Self {
        Self {
            saved: Arc::new(Mutex::new(Some(favorites))),
        }
    }

    /// What was last saved, if anything.
    pub fn saved(&self) -> Option<FavoritesSet> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FavoritesStorage for MemoryStorage {
    fn load(&self) -> Result<FavoritesSet, StorageError> {
        Ok(self.saved().unwrap_or_default())
    }

    fn save(&self, favorites: &FavoritesSet) -> Result<(), StorageError> {
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(favorites.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorites() -> FavoritesSet {
        vec![
            Product::new(3, "Jacket", 55.99, "men's clothing"),
            Product::new(1, "Backpack", 109.95, "men's clothing"),
        ]
        .into()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("favorites.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/dir/favorites.json"));
        storage.save(&favorites()).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, favorites());
        assert_eq!(loaded.ids().iter().map(|id| id.get()).collect::<Vec<_>>(), vec![3, 1]);
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_envelope_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        JsonFileStorage::new(&path).save(&favorites()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], FORMAT_VERSION);
        assert!(raw["saved_at"].is_string());
        assert_eq!(raw["items"][0]["id"], 3);
    }

    #[test]
    fn test_bare_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(
            &path,
            r#"[{"id":5,"title":"Ring","price":9.99,"category":"jewelery"}]"#,
        )
        .unwrap();
        let loaded = JsonFileStorage::new(&path).load().unwrap();
        assert_eq!(loaded.count(), 1);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(
            &path,
            r#"{"version":9,"saved_at":"2026-01-01T00:00:00Z","items":[]}"#,
        )
        .unwrap();
        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        assert!(storage.load().unwrap().is_empty());
        storage.save(&favorites()).unwrap();
        assert_eq!(handle.saved(), Some(favorites()));
    }
}
