#![forbid(unsafe_code)]

//! Progress persistence.
//!
//! A tour with `remember_progress` saves the index of every step it shows and
//! resumes there on the next `start()`. The value lives under a configurable
//! key with an expiry horizon.
//!
//! # Storage backends
//!
//! - [`MemoryStorage`]: in-process map, the default.
//! - `FileStorage` (feature `state-persistence`): a JSON file holding every
//!   key, for cross-session resume in native hosts.
//!
//! # Failure model
//!
//! Stores report [`StorageError`]s; [`ProgressGateway`] swallows them. A
//! missing, expired or corrupt value reads as "no saved progress" and a
//! failed write is logged and forgotten.

use std::collections::HashMap;
use std::time::Duration;

use web_time::SystemTime;

use crate::attributes::leading_int;
use crate::error::StorageError;

/// Key/value persistence for the last step seen.
pub trait ProgressStore {
    /// Store `index` under `key`, expiring after `ttl`.
    fn save(&mut self, key: &str, index: usize, ttl: Duration) -> Result<(), StorageError>;

    /// Saved index, or `None` when absent or expired.
    fn load(&self, key: &str) -> Result<Option<usize>, StorageError>;

    /// Remove any value under `key`.
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Decode a stored value. Negative numbers count as corrupt.
fn decode(raw: &str) -> Result<usize, StorageError> {
    leading_int(raw)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| StorageError::Corrupt(format!("{raw:?} is not a step index")))
}

#[derive(Debug, Clone)]
struct Entry {
    raw: String,
    expires: SystemTime,
}

/// In-memory progress store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Entry>,
}

impl MemoryStorage {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw string value, bypassing encoding.
    pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>, ttl: Duration) {
        self.entries.insert(
            key.into(),
            Entry {
                raw: raw.into(),
                expires: SystemTime::now() + ttl,
            },
        );
    }

    /// Whether anything is stored under `key`, expired or not.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressStore for MemoryStorage {
    fn save(&mut self, key: &str, index: usize, ttl: Duration) -> Result<(), StorageError> {
        self.insert_raw(key, index.to_string(), ttl);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<usize>, StorageError> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };
        if SystemTime::now() >= entry.expires {
            return Ok(None);
        }
        decode(&entry.raw).map(Some)
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(feature = "state-persistence")]
pub use file::FileStorage;

#[cfg(feature = "state-persistence")]
mod file {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use serde::{Deserialize, Serialize};
    use web_time::{SystemTime, UNIX_EPOCH};

    use super::{ProgressStore, decode};
    use crate::error::StorageError;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct FileEntry {
        value: String,
        expires_at_ms: u64,
    }

    type FileMap = BTreeMap<String, FileEntry>;

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().min(u64::MAX as u128) as u64)
            .unwrap_or(0)
    }

    /// JSON-file progress store.
    ///
    /// Writes go to a sibling temporary file that is then renamed over the
    /// target, so readers never see a half-written file.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// Store backed by `path`. The file is created on first save.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// Backing file.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_map(&self) -> Result<FileMap, StorageError> {
            match fs::read_to_string(&self.path) {
                Ok(content) => serde_json::from_str(&content)
                    .map_err(|e| StorageError::Corrupt(e.to_string())),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileMap::new()),
                Err(e) => Err(StorageError::Io(e)),
            }
        }

        fn write_map(&self, map: &FileMap) -> Result<(), StorageError> {
            let json = serde_json::to_string_pretty(map)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?;
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl ProgressStore for FileStorage {
        fn save(&mut self, key: &str, index: usize, ttl: Duration) -> Result<(), StorageError> {
            // A corrupt file is replaced rather than blocking every later save.
            let mut map = self.read_map().unwrap_or_default();
            let ttl_ms = ttl.as_millis().min(u64::MAX as u128) as u64;
            map.insert(
                key.to_string(),
                FileEntry {
                    value: index.to_string(),
                    expires_at_ms: now_ms().saturating_add(ttl_ms),
                },
            );
            self.write_map(&map)
        }

        fn load(&self, key: &str) -> Result<Option<usize>, StorageError> {
            let map = self.read_map()?;
            let Some(entry) = map.get(key) else {
                return Ok(None);
            };
            if now_ms() >= entry.expires_at_ms {
                return Ok(None);
            }
            decode(&entry.value).map(Some)
        }

        fn clear(&mut self, key: &str) -> Result<(), StorageError> {
            let mut map = match self.read_map() {
                Ok(map) => map,
                Err(StorageError::Corrupt(_)) => FileMap::new(),
                Err(e) => return Err(e),
            };
            if map.remove(key).is_none() {
                return Ok(());
            }
            if map.is_empty() {
                match fs::remove_file(&self.path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(StorageError::Io(e)),
                }
            } else {
                self.write_map(&map)
            }
        }
    }
}

/// The engine's view of persistence: one store, one key, one TTL.
pub struct ProgressGateway {
    store: Box<dyn ProgressStore>,
    key: String,
    ttl: Duration,
}

impl std::fmt::Debug for ProgressGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressGateway")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl ProgressGateway {
    /// Gateway over `store`.
    #[must_use]
    pub fn new(store: Box<dyn ProgressStore>, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
        }
    }

    /// Change key and TTL (after reconfiguration).
    pub fn retarget(&mut self, key: impl Into<String>, ttl: Duration) {
        self.key = key.into();
        self.ttl = ttl;
    }

    /// Current key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Save `index`; failures are logged.
    pub fn save(&mut self, index: usize) {
        if let Err(err) = self.store.save(&self.key, index, self.ttl) {
            tracing::warn!(key = %self.key, index, error = %err, "progress save failed");
        }
    }

    /// Saved index, if any usable one exists.
    #[must_use]
    pub fn load(&self) -> Option<usize> {
        match self.store.load(&self.key) {
            Ok(Some(index)) => Some(index),
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved progress");
                None
            }
            Err(err) => {
                tracing::debug!(key = %self.key, error = %err, "ignoring unreadable progress");
                None
            }
        }
    }

    /// Forget saved progress; failures are logged.
    pub fn clear(&mut self) {
        if let Err(err) = self.store.clear(&self.key) {
            tracing::warn!(key = %self.key, error = %err, "progress clear failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    #[test]
    fn memory_round_trip() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.load("k").expect("load"), None);
        store.save("k", 3, TTL).expect("save");
        assert_eq!(store.load("k").expect("load"), Some(3));
        store.clear("k").expect("clear");
        assert_eq!(store.load("k").expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_expired_reads_absent() {
        let mut store = MemoryStorage::new();
        store.save("k", 2, Duration::ZERO).expect("save");
        assert!(store.contains("k"));
        assert_eq!(store.load("k").expect("load"), None);
    }

    #[test]
    fn lenient_decoding() {
        let mut store = MemoryStorage::new();
        store.insert_raw("a", "4 steps", TTL);
        store.insert_raw("b", "garbage", TTL);
        store.insert_raw("c", "-1", TTL);
        assert_eq!(store.load("a").expect("load"), Some(4));
        assert!(matches!(store.load("b"), Err(StorageError::Corrupt(_))));
        assert!(matches!(store.load("c"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn gateway_treats_corrupt_as_absent() {
        let mut store = MemoryStorage::new();
        store.insert_raw("walkthrough_progress", "nope", TTL);
        let gateway = ProgressGateway::new(Box::new(store), "walkthrough_progress", TTL);
        assert_eq!(gateway.load(), None);
    }

    #[test]
    fn gateway_uses_its_key() {
        let mut gateway = ProgressGateway::new(Box::new(MemoryStorage::new()), "a", TTL);
        gateway.save(5);
        assert_eq!(gateway.load(), Some(5));
        gateway.retarget("b", TTL);
        assert_eq!(gateway.key(), "b");
        assert_eq!(gateway.load(), None);
        gateway.save(1);
        gateway.retarget("a", TTL);
        assert_eq!(gateway.load(), Some(5));
        gateway.clear();
        assert_eq!(gateway.load(), None);
    }

    struct Broken;

    impl ProgressStore for Broken {
        fn save(&mut self, _: &str, _: usize, _: Duration) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
        fn load(&self, _: &str) -> Result<Option<usize>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("unreadable")))
        }
        fn clear(&mut self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn gateway_swallows_store_failures() {
        let mut gateway = ProgressGateway::new(Box::new(Broken), "k", TTL);
        gateway.save(1);
        gateway.clear();
        assert_eq!(gateway.load(), None);
    }
}
