// Persisted log channel settings
// Whole-file JSON: {"log_channels": {"<guild_id>": <channel_id>}}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk layout of the settings file
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    log_channels: BTreeMap<u64, u64>,
}

/// Guild id -> log channel id, mirrored to a JSON file on every change
#[derive(Debug)]
pub struct LogSettingsStore {
    path: PathBuf,
    channels: DashMap<u64, u64>,
}

impl LogSettingsStore {
    /// Open the store at `path`, creating the parent directory if needed and
    /// loading whatever is already persisted there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(dir) {
                error!("Failed to create data directory {}: {}", dir.display(), e);
            }
        }

        let store = Self {
            path,
            channels: DashMap::new(),
        };
        for (guild_id, channel_id) in store.load() {
            store.channels.insert(guild_id, channel_id);
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted mapping. A missing file is an empty mapping; a
    /// malformed one is logged and treated as empty.
    pub fn load(&self) -> BTreeMap<u64, u64> {
        match read_settings(&self.path) {
            Ok(Some(channels)) => {
                info!("Loaded logging settings for {} guilds", channels.len());
                channels
            }
            Ok(None) => {
                info!("No logging settings file found, using defaults");
                BTreeMap::new()
            }
            Err(e) => {
                error!("Error loading logging settings: {}", e);
                BTreeMap::new()
            }
        }
    }

    /// Rewrite the settings file from the in-memory map. Failures are logged;
    /// the in-memory map stays authoritative.
    pub fn save(&self) {
        match write_settings(&self.path, &self.snapshot()) {
            Ok(()) => info!("Saved logging settings to {}", self.path.display()),
            Err(e) => error!("Error saving logging settings: {}", e),
        }
    }

    pub fn get(&self, guild_id: u64) -> Option<u64> {
        self.channels.get(&guild_id).map(|entry| *entry.value())
    }

    /// Upsert a guild's log channel and persist
    pub fn set(&self, guild_id: u64, channel_id: u64) {
        self.channels.insert(guild_id, channel_id);
        self.save();
    }

    /// Remove a guild's log channel. Persists only when something was removed.
    pub fn unset(&self, guild_id: u64) -> bool {
        let removed = self.channels.remove(&guild_id).is_some();
        if removed {
            self.save();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn snapshot(&self) -> BTreeMap<u64, u64> {
        self.channels
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }
}

fn read_settings(path: &Path) -> Result<Option<BTreeMap<u64, u64>>, SettingsError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let file: SettingsFile = serde_json::from_str(&raw).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    // Snowflakes are never zero
    let mut channels = file.log_channels;
    let before = channels.len();
    channels.retain(|guild_id, channel_id| *guild_id != 0 && *channel_id != 0);
    if channels.len() != before {
        warn!("Dropped {} invalid entries from {}", before - channels.len(), path.display());
    }

    Ok(Some(channels))
}

fn write_settings(path: &Path, channels: &BTreeMap<u64, u64>) -> Result<(), SettingsError> {
    let file = SettingsFile {
        log_channels: channels.clone(),
    };
    let json = serde_json::to_string(&file).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("log-settings-{}-{}", std::process::id(), n))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = LogSettingsStore::open(temp_path("logging_settings.json"));
        assert!(store.is_empty());
        assert!(store.load().is_empty());
        assert!(store.path().parent().unwrap().is_dir());
    }

    #[test]
    fn test_set_writes_expected_layout() {
        let path = temp_path("logging_settings.json");
        let store = LogSettingsStore::open(&path);
        store.set(100, 555);

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"log_channels": {"100": 555}}));
    }

    #[test]
    fn test_round_trip_through_reopen() {
        let path = temp_path("logging_settings.json");
        let store = LogSettingsStore::open(&path);
        store.set(1, 10);
        store.set(2, 20);
        store.set(1, 11);

        let reopened = LogSettingsStore::open(&path);
        assert_eq!(reopened.snapshot(), BTreeMap::from([(1, 11), (2, 20)]));
        assert_eq!(reopened.load(), store.snapshot());
    }

    #[test]
    fn test_unset_is_idempotent() {
        let path = temp_path("logging_settings.json");
        let store = LogSettingsStore::open(&path);
        store.set(7, 70);

        assert!(store.unset(7));
        assert!(!store.unset(7));
        assert_eq!(store.get(7), None);
        assert!(LogSettingsStore::open(&path).is_empty());
    }

    #[test]
    fn test_unset_missing_does_not_create_file() {
        let path = temp_path("logging_settings.json");
        let store = LogSettingsStore::open(&path);
        assert!(!store.unset(42));
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_file_falls_back_to_empty() {
        let path = temp_path("logging_settings.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let store = LogSettingsStore::open(&path);
        assert!(store.is_empty());
        assert!(matches!(read_settings(&path), Err(SettingsError::Json { .. })));
    }

    #[test]
    fn test_zero_ids_are_dropped() {
        let path = temp_path("logging_settings.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"log_channels": {"0": 5, "3": 0, "4": 40}}"#).unwrap();

        let store = LogSettingsStore::open(&path);
        assert_eq!(store.snapshot(), BTreeMap::from([(4, 40)]));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        // A regular file where the data directory should be
        let blocker = temp_path("blocker");
        std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        std::fs::write(&blocker, "").unwrap();

        let store = LogSettingsStore::open(blocker.join("logging_settings.json"));
        store.set(9, 90);
        assert_eq!(store.get(9), Some(90));
    }
}
