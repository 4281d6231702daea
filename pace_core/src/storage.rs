//! # Local Storage
//!
//! Key-value persistence for usage stats and remembered form values:
//! - **`KeyValueStore`**: `get`/`set` of string values under fixed keys
//! - **`MemoryStore`**: in-process map, used for tests and degraded sessions
//! - **`FileStore`**: one JSON file per key in a data directory, written
//!   atomically under an exclusive lock
//!
//! Absent or malformed stored records are never fatal; they load as empty.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::storage::{load_stats, save_stats, MemoryStore};
//! use pace_core::stats::UsageStats;
//!
//! let mut store = MemoryStore::new();
//! assert!(load_stats(&store).is_empty());
//!
//! let mut stats = UsageStats::new();
//! stats.calculations = 3;
//! save_stats(&mut store, &stats).unwrap();
//! assert_eq!(load_stats(&store).calculations, 3);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::stats::UsageStats;

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

/// Key for the serialized [`UsageStats`]
pub const RUNNING_STATS_KEY: &str = "runningStats";
/// Key for the serialized [`FormData`]
pub const FORM_DATA_KEY: &str = "formData";
/// Key set to `"true"` once the first session has run
pub const RETURNING_VISITOR_KEY: &str = "returningVisitor";

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if never written.
    fn get(&self, key: &str) -> CalcResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> CalcResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Last values entered in the calculator forms.
///
/// Values are kept as entered text so a half-typed field round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdot_distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdot_minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdot_seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

/// Read and parse a JSON record; absent or malformed yields `None`.
fn load_record<T, S>(store: &S, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored record");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "stored record unreadable, starting fresh");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored record malformed, starting fresh");
            None
        }
    }
}

fn save_record<T, S>(store: &mut S, key: &str, value: &T) -> CalcResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Load usage stats; fresh stats when absent or malformed.
pub fn load_stats<S: KeyValueStore + ?Sized>(store: &S) -> UsageStats {
    load_record(store, RUNNING_STATS_KEY).unwrap_or_default()
}

/// Persist usage stats.
pub fn save_stats<S: KeyValueStore + ?Sized>(store: &mut S, stats: &UsageStats) -> CalcResult<()> {
    save_record(store, RUNNING_STATS_KEY, stats)
}

/// Load remembered form values; empty when absent or malformed.
pub fn load_form_data<S: KeyValueStore + ?Sized>(store: &S) -> FormData {
    load_record(store, FORM_DATA_KEY).unwrap_or_default()
}

/// Persist form values.
pub fn save_form_data<S: KeyValueStore + ?Sized>(store: &mut S, form: &FormData) -> CalcResult<()> {
    save_record(store, FORM_DATA_KEY, form)
}

/// Whether a previous session has marked this device as seen.
pub fn is_returning_visitor<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    matches!(store.get(RETURNING_VISITOR_KEY), Ok(Some(v)) if v == "true")
}

/// Mark this device as seen.
pub fn mark_returning_visitor<S: KeyValueStore + ?Sized>(store: &mut S) -> CalcResult<()> {
    store.set(RETURNING_VISITOR_KEY, "true")
}

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::fs::{self, File, OpenOptions};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use fs2::FileExt;

    use super::KeyValueStore;
    use crate::errors::{CalcError, CalcResult};

    const LOCK_FILE: &str = ".stride.lock";

    /// Directory-backed store: `<dir>/<key>.json` per key.
    ///
    /// Writes go to `<key>.json.tmp`, are fsynced, then renamed over the
    /// target while an exclusive lock on `.stride.lock` is held, so a
    /// second process never observes a half-written record.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        /// Open (creating if needed) a store rooted at `dir`.
        pub fn open(dir: impl Into<PathBuf>) -> CalcResult<Self> {
            let dir = dir.into();
            fs::create_dir_all(&dir).map_err(|e| {
                CalcError::persistence("create directory", dir.display().to_string(), e.to_string())
            })?;
            Ok(FileStore { dir })
        }

        /// Root directory of the store
        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{}.json", key))
        }

        fn lock(&self, key: &str) -> CalcResult<File> {
            let lock_path = self.dir.join(LOCK_FILE);
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&lock_path)
                .map_err(|e| CalcError::persistence("open lock", key, e.to_string()))?;
            file.lock_exclusive()
                .map_err(|e| CalcError::persistence("lock", key, e.to_string()))?;
            Ok(file)
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> CalcResult<Option<String>> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(CalcError::persistence("read", key, e.to_string())),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
            let lock = self.lock(key)?;
            let path = self.path_for(key);
            let tmp_path = path.with_extension("json.tmp");

            let mut tmp_file = File::create(&tmp_path)
                .map_err(|e| CalcError::persistence("create temp file", key, e.to_string()))?;
            tmp_file
                .write_all(value.as_bytes())
                .map_err(|e| CalcError::persistence("write temp file", key, e.to_string()))?;
            tmp_file
                .sync_all()
                .map_err(|e| CalcError::persistence("sync temp file", key, e.to_string()))?;

            fs::rename(&tmp_path, &path).map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                CalcError::persistence("rename to final", key, e.to_string())
            })?;

            // Closing the handle releases the OS lock as well.
            let _ = lock.unlock();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_get_missing_key() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::open(dir.path()).unwrap();
            assert_eq!(store.get("runningStats").unwrap(), None);
        }

        #[test]
        fn test_set_then_get() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set("formData", "{\"weight\":\"70\"}").unwrap();
            assert_eq!(store.get("formData").unwrap().as_deref(), Some("{\"weight\":\"70\"}"));

            store.set("formData", "{}").unwrap();
            assert_eq!(store.get("formData").unwrap().as_deref(), Some("{}"));
        }

        #[test]
        fn test_atomic_save_creates_no_tmp_file() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set("runningStats", "{}").unwrap();
            assert!(dir.path().join("runningStats.json").exists());
            assert!(!dir.path().join("runningStats.json.tmp").exists());
        }

        #[test]
        fn test_open_creates_directory() {
            let dir = tempfile::tempdir().unwrap();
            let nested = dir.path().join("a").join("b");
            let store = FileStore::open(&nested).unwrap();
            assert!(nested.is_dir());
            assert_eq!(store.dir(), nested.as_path());
        }
    }
}

/// Store that always fails; handy for exercising degraded sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        Err(CalcError::persistence("read", key, "storage is unavailable"))
    }

    fn set(&mut self, key: &str, _value: &str) -> CalcResult<()> {
        Err(CalcError::persistence("write", key, "storage is unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stats_are_fresh() {
        let store = MemoryStore::new();
        let stats = load_stats(&store);
        assert!(stats.is_empty());
        assert!(stats.favorite_calculator.is_none());
    }

    #[test]
    fn test_malformed_stats_are_fresh() {
        let mut store = MemoryStore::new();
        store.set(RUNNING_STATS_KEY, "{not json").unwrap();
        assert!(load_stats(&store).is_empty());

        store.set(RUNNING_STATS_KEY, "42").unwrap();
        assert!(load_stats(&store).is_empty());
    }

    #[test]
    fn test_unreadable_store_is_fresh() {
        assert!(load_stats(&UnavailableStore).is_empty());
        assert_eq!(load_form_data(&UnavailableStore), FormData::default());
        assert!(!is_returning_visitor(&UnavailableStore));
    }

    #[test]
    fn test_form_data_roundtrip() {
        let mut store = MemoryStore::new();
        let form = FormData {
            vdot_distance: Some("5000".to_string()),
            weight: Some("68.5".to_string()),
            ..Default::default()
        };
        save_form_data(&mut store, &form).unwrap();

        let raw = store.get(FORM_DATA_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"vdotDistance":"5000","weight":"68.5"}"#);
        assert_eq!(load_form_data(&store), form);
    }

    #[test]
    fn test_returning_visitor_flag() {
        let mut store = MemoryStore::new();
        assert!(!is_returning_visitor(&store));
        mark_returning_visitor(&mut store).unwrap();
        assert!(is_returning_visitor(&store));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        mark_returning_visitor(&mut store).unwrap();
        assert!(is_returning_visitor(&store));
        assert_eq!(store.get(RETURNING_VISITOR_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_save_to_unavailable_store_errors() {
        let err = save_stats(&mut UnavailableStore, &UsageStats::new()).unwrap_err();
        assert!(err.is_recoverable());
    }
}
