use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, de::IgnoredAny, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::utils::format_relative;

/// Distinguishes temp files of concurrent writers to the same key.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to access cache entry {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache entry {key} is unreadable: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A cached payload and the time it was written.
///
/// The timestamp is informational only; entries never expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        // Clock skew can put cached_at slightly in the future
        if self.age_minutes() < 1 {
            return "just now".to_string();
        }
        format_relative(self.cached_at, Utc::now())
    }
}

/// File-backed key-value store, one JSON file per key.
pub struct CacheStore {
    cache_dir: PathBuf,
}

impl CacheStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Load an entry, telling "never written" (`Ok(None)`) apart from
    /// "present but unreadable" (`Err`).
    pub fn load_entry<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CachedData<T>>, CacheError> {
        let path = self.cache_path(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| CacheError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Load the value stored under `key`.
    ///
    /// Missing and unreadable entries both come back as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load_entry(key) {
            Ok(entry) => entry.map(|cached| cached.data),
            Err(e) => {
                debug!(cache = key, error = %e, "Ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// Failures are logged and swallowed.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!(cache = key, error = %e, "Failed to write cache entry");
        }
    }

    /// Store `value` under `key`. Readers see either the old or the new
    /// entry, never a partial write.
    pub fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            key: key.to_string(),
            source,
        };

        let contents = serde_json::to_string_pretty(&CachedData::new(value)).map_err(|source| {
            CacheError::Corrupt {
                key: key.to_string(),
                source,
            }
        })?;

        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .cache_dir
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), seq));
        let written = std::fs::write(&tmp, contents)
            .and_then(|()| std::fs::rename(&tmp, self.cache_path(key)));
        if let Err(source) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        debug!(cache = key, "Cache entry written");
        Ok(())
    }

    /// How long ago `key` was written, e.g. "5m ago"
    pub fn age_display(&self, key: &str) -> Option<String> {
        match self.load_entry::<IgnoredAny>(key) {
            Ok(entry) => entry.map(|cached| cached.age_display()),
            Err(e) => {
                debug!(cache = key, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    /// Delete one entry. Returns whether anything was removed.
    pub fn remove(&self, key: &str) -> Result<bool, CacheError> {
        match std::fs::remove_file(self.cache_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Delete every entry in the cache directory, returning how many were removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let io_err = |source| CacheError::Io {
            key: "*".to_string(),
            source,
        };
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.cache_dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path).map_err(io_err)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    use crate::models::{Envelope, Pad};

    fn store() -> (TempDir, CacheStore) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("cache")).unwrap();
        (dir, store)
    }

    fn pad(id: &str) -> Pad {
        Pad {
            id: id.into(),
            name: format!("LC-{}", id),
            latitude: 28.5,
            longitude: -80.6,
            location_name: None,
            country_code: Some("USA".into()),
        }
    }

    #[test]
    fn test_save_then_load_returns_same_envelope() {
        let (_dir, store) = store();
        let envelope = Envelope::new(vec![pad("39A"), pad("40")]);
        store.save("cached_pads", &envelope);

        let loaded: Option<Envelope<Pad>> = store.load("cached_pads");
        assert_eq!(loaded, Some(envelope));
        assert!(store.cache_dir().join("cached_pads.json").exists());
    }

    #[test]
    fn test_repeated_loads_are_identical() {
        let (_dir, store) = store();
        store.save("cached_pads", &Envelope::new(vec![pad("39A")]));
        let first: Option<Envelope<Pad>> = store.load("cached_pads");
        let second: Option<Envelope<Pad>> = store.load("cached_pads");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_key_is_none_not_error() {
        let (_dir, store) = store();
        assert!(store.load::<Envelope<Pad>>("cached_pads").is_none());
        assert!(matches!(store.load_entry::<Envelope<Pad>>("cached_pads"), Ok(None)));
    }

    #[test]
    fn test_corrupt_entry_is_none_but_distinguishable() {
        let (_dir, store) = store();
        std::fs::write(store.cache_dir().join("cached_pads.json"), "{ not json").unwrap();

        assert!(store.load::<Envelope<Pad>>("cached_pads").is_none());
        assert!(matches!(
            store.load_entry::<Envelope<Pad>>("cached_pads"),
            Err(CacheError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_schema_mismatch_is_none() {
        let (_dir, store) = store();
        store.save("cached_pads", &vec!["just", "strings"]);
        assert!(store.load::<Envelope<Pad>>("cached_pads").is_none());
    }

    #[test]
    fn test_overwrite_replaces_whole_entry() {
        let (_dir, store) = store();
        store.save("cached_pads", &Envelope::new(vec![pad("a"), pad("b")]));
        store.save("cached_pads", &Envelope::new(vec![pad("c")]));

        let loaded: Envelope<Pad> = store.load("cached_pads").unwrap();
        assert_eq!(loaded.items, vec![pad("c")]);

        let leftovers = std::fs::read_dir(store.cache_dir())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().extension().unwrap() == "tmp")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_save_failure_does_not_panic() {
        let (dir, store) = store();
        std::fs::remove_dir_all(dir.path().join("cache")).unwrap();
        store.save("cached_pads", &Envelope::new(vec![pad("a")]));
        assert!(store.try_save("cached_pads", &Envelope::new(vec![pad("a")])).is_err());
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let (_dir, store) = store();
        // A non-empty directory at the entry path makes the rename fail
        let blocked = store.cache_dir().join("cached_pads.json");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();

        assert!(store.try_save("cached_pads", &Envelope::new(vec![pad("a")])).is_err());

        let leftovers = std::fs::read_dir(store.cache_dir())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "tmp")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_remove_and_clear() {
        let (_dir, store) = store();
        store.save("cached_pads", &Envelope::new(vec![pad("a")]));
        store.save("cached_events", &Envelope::<Pad>::new(vec![]));

        assert!(store.remove("cached_pads").unwrap());
        assert!(!store.remove("cached_pads").unwrap());
        assert_eq!(store.clear().unwrap(), 1);
        assert!(store.load::<Envelope<Pad>>("cached_events").is_none());
    }

    #[test]
    fn test_age_display() {
        let (_dir, store) = store();
        assert!(store.age_display("cached_pads").is_none());
        store.save("cached_pads", &Envelope::new(vec![pad("a")]));
        assert_eq!(store.age_display("cached_pads").as_deref(), Some("just now"));

        let mut old = CachedData::new(1);
        old.cached_at = Utc::now() - Duration::minutes(61);
        assert_eq!(old.age_display(), "1h ago");
    }
}
